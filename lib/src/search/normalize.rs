//! Mapping from the Brave Search response body to [`SearchResult`]s.
//!
//! Both call modes of the client funnel the raw body through [`parse_body`],
//! so identical responses always normalize identically.

use serde::Deserialize;
use serde_json::Value;

use super::types::{NO_DESCRIPTION, NO_TITLE, SearchResult};
use crate::error::SearchError;

/// An upstream item; every field may be missing or `null`.
#[derive(Debug, Deserialize)]
struct RawResult {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
}

impl From<RawResult> for SearchResult {
    fn from(raw: RawResult) -> Self {
        Self {
            title: raw.title.unwrap_or_else(|| NO_TITLE.to_string()),
            url: raw.url.unwrap_or_default(),
            description: raw
                .description
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        }
    }
}

/// Parse a raw response body and normalize it.
pub fn parse_body(body: &[u8]) -> Result<Vec<SearchResult>, SearchError> {
    let data: Value =
        serde_json::from_slice(body).map_err(|e| SearchError::Parse(e.to_string()))?;
    format_results(&data)
}

/// Extract `web.results` and map each item into a [`SearchResult`].
///
/// A missing path (including a non-object top level) is
/// `SearchError::NoResults`; items that are not shaped like search results
/// are `SearchError::Parse`. Upstream order is preserved.
pub fn format_results(data: &Value) -> Result<Vec<SearchResult>, SearchError> {
    let items = data
        .get("web")
        .and_then(|web| web.get("results"))
        .ok_or(SearchError::NoResults)?;

    let raw = Vec::<RawResult>::deserialize(items).map_err(|e| SearchError::Parse(e.to_string()))?;

    Ok(raw.into_iter().map(SearchResult::from).collect())
}
