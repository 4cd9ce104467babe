use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Results requested when the caller does not say otherwise.
pub const DEFAULT_COUNT: u32 = 10;

/// Placeholder used when an upstream item has no title.
pub const NO_TITLE: &str = "No title";

/// Placeholder used when an upstream item has no description.
pub const NO_DESCRIPTION: &str = "No description available";

/// Input parameters for a single search.
///
/// `count` (documented range 1-20) and `offset` (documented range 0-9) are
/// forwarded to the API exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The search query string
    pub query: String,

    /// Number of results to return
    #[serde(default = "default_count")]
    pub count: u32,

    /// Offset for pagination
    #[serde(default)]
    pub offset: u32,
}

fn default_count() -> u32 {
    DEFAULT_COUNT
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            count: DEFAULT_COUNT,
            offset: 0,
        }
    }

    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Reject empty queries before anything goes over the wire.
    ///
    /// Whitespace-only queries are sent as-is.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        Ok(())
    }

    /// The URL query parameters sent to the API.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.query.clone()),
            ("count", self.count.to_string()),
            ("offset", self.offset.to_string()),
        ]
    }
}

impl From<&str> for SearchRequest {
    fn from(query: &str) -> Self {
        Self::new(query)
    }
}

impl From<String> for SearchRequest {
    fn from(query: String) -> Self {
        Self::new(query)
    }
}

impl From<&SearchRequest> for SearchRequest {
    fn from(request: &SearchRequest) -> Self {
        request.clone()
    }
}

/// A single normalized search result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchResult {
    /// Title of the web page
    pub title: String,
    /// URL of the web page
    pub url: String,
    /// Snippet/description of the page content
    pub description: String,
}

/// Describes why a search failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorResult {
    pub error: String,
}

/// One element of the serialized, list-shaped outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchRecord {
    Error(ErrorResult),
    Result(SearchResult),
}

/// What a search call produced.
///
/// Serializes to the list shape external consumers expect: success is an
/// array of result objects and failure is a one-element array holding
/// `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<SearchRecord>", try_from = "Vec<SearchRecord>")]
pub enum SearchOutcome {
    /// Zero or more results, in upstream order
    Results(Vec<SearchResult>),
    /// The call failed
    Failed(ErrorResult),
}

impl SearchOutcome {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(ErrorResult {
            error: message.into(),
        })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(e) => Some(e.error.as_str()),
            Self::Results(_) => None,
        }
    }

    /// The results; empty for a failed outcome.
    pub fn results(&self) -> &[SearchResult] {
        match self {
            Self::Results(results) => results.as_slice(),
            Self::Failed(_) => &[],
        }
    }

    pub fn into_result(self) -> Result<Vec<SearchResult>, ErrorResult> {
        match self {
            Self::Results(results) => Ok(results),
            Self::Failed(e) => Err(e),
        }
    }
}

impl From<SearchError> for SearchOutcome {
    fn from(error: SearchError) -> Self {
        Self::failed(error.sentinel_message())
    }
}

impl From<SearchOutcome> for Vec<SearchRecord> {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Results(results) => {
                results.into_iter().map(SearchRecord::Result).collect()
            }
            SearchOutcome::Failed(e) => vec![SearchRecord::Error(e)],
        }
    }
}

impl TryFrom<Vec<SearchRecord>> for SearchOutcome {
    type Error = String;

    fn try_from(records: Vec<SearchRecord>) -> Result<Self, Self::Error> {
        let has_error = records
            .iter()
            .any(|r| matches!(r, SearchRecord::Error(_)));

        if !has_error {
            return Ok(Self::Results(
                records
                    .into_iter()
                    .filter_map(|r| match r {
                        SearchRecord::Result(result) => Some(result),
                        SearchRecord::Error(_) => None,
                    })
                    .collect(),
            ));
        }

        let len = records.len();
        match records.into_iter().next() {
            Some(SearchRecord::Error(e)) if len == 1 => Ok(Self::Failed(e)),
            _ => Err(format!(
                "an error record must be the only element, found {len} records"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(title: &str) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            url: format!("https://example.com/{title}"),
            description: format!("About {title}"),
        }
    }

    #[test]
    fn test_request_defaults() {
        let request = SearchRequest::new("rust");
        assert_eq!(request.count, 10);
        assert_eq!(request.offset, 0);
        assert_eq!(SearchRequest::from("rust"), request);
    }

    #[test]
    fn test_request_params_are_not_clamped() {
        let request = SearchRequest::new("x").with_count(50).with_offset(12);
        assert_eq!(
            request.query_params(),
            vec![
                ("q", "x".to_string()),
                ("count", "50".to_string()),
                ("offset", "12".to_string()),
            ]
        );
    }

    #[test]
    fn test_request_deserialization_fills_defaults() {
        let request: SearchRequest = serde_json::from_str(r#"{"query": "rust"}"#).unwrap();
        assert_eq!(request, SearchRequest::new("rust"));
    }

    #[test]
    fn test_empty_query_is_rejected() {
        assert!(matches!(
            SearchRequest::new("").validate(),
            Err(SearchError::EmptyQuery)
        ));
        assert!(SearchRequest::new("rust").validate().is_ok());
    }

    #[test]
    fn test_whitespace_query_is_allowed() {
        assert!(SearchRequest::new(" \t").validate().is_ok());
    }

    #[test]
    fn test_success_serializes_as_plain_list() {
        let outcome = SearchOutcome::Results(vec![result("a"), result("b")]);
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[0]["title"], "a");
        assert!(value[0].get("error").is_none());
    }

    #[test]
    fn test_failure_serializes_as_single_error_record() {
        let outcome = SearchOutcome::failed("Search failed: boom");
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value, json!([{ "error": "Search failed: boom" }]));
    }

    #[test]
    fn test_sentinel_shape_deserializes_to_failed() {
        let outcome: SearchOutcome =
            serde_json::from_value(json!([{ "error": "No results found in API response" }]))
                .unwrap();
        assert_eq!(outcome.error(), Some("No results found in API response"));
        assert!(outcome.results().is_empty());
    }

    #[test]
    fn test_empty_list_is_empty_success() {
        let outcome: SearchOutcome = serde_json::from_value(json!([])).unwrap();
        assert_eq!(outcome, SearchOutcome::Results(vec![]));
        assert!(!outcome.is_failed());
    }

    #[test]
    fn test_mixed_records_are_rejected() {
        let mixed = json!([
            { "title": "a", "url": "https://a", "description": "a" },
            { "error": "boom" }
        ]);
        let err = serde_json::from_value::<SearchOutcome>(mixed).unwrap_err();
        assert!(err.to_string().contains("only element"));
    }

    #[test]
    fn test_multiple_errors_are_rejected() {
        let doubled = json!([{ "error": "a" }, { "error": "b" }]);
        assert!(serde_json::from_value::<SearchOutcome>(doubled).is_err());
    }

    #[test]
    fn test_into_result() {
        assert_eq!(
            SearchOutcome::Results(vec![result("a")]).into_result(),
            Ok(vec![result("a")])
        );
        assert_eq!(
            SearchOutcome::failed("boom").into_result(),
            Err(ErrorResult {
                error: "boom".to_string()
            })
        );
    }

    #[test]
    fn test_outcome_from_search_error() {
        let outcome = SearchOutcome::from(SearchError::NoResults);
        assert_eq!(outcome.error(), Some("No results found in API response"));
    }
}
