use thiserror::Error;

/// Errors raised while constructing a [`SearchClient`](crate::SearchClient).
///
/// The only failures surfaced to callers as `Err`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing Brave Search API key. Checked: {}", sources.join(", "))]
    MissingCredential { sources: Vec<String> },

    #[error("Brave Search API key cannot be sent as a header: {reason}")]
    InvalidCredential { reason: String },

    #[error("Invalid search endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

/// Errors that can occur while performing a single search.
///
/// `search` and `async_search` never return these directly; they are logged
/// and folded into [`SearchOutcome::Failed`](crate::SearchOutcome::Failed).
#[derive(Debug, Error)]
pub enum SearchError {
    /// HTTP transport failed (connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// Body was not JSON, or results were not shaped like search items
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The `web.results` path is missing from the response
    #[error("No results found in API response")]
    NoResults,

    #[error("query cannot be empty")]
    EmptyQuery,

    /// A failed outcome reported through an `Err` channel (rig tools)
    #[error("{0}")]
    Failed(String),
}

impl SearchError {
    /// The message carried by the error sentinel for this failure.
    ///
    /// A missing `web.results` path is reported verbatim; everything else is
    /// prefixed with `Search failed:`.
    pub fn sentinel_message(&self) -> String {
        match self {
            Self::NoResults | Self::Failed(_) => self.to_string(),
            other => format!("Search failed: {other}"),
        }
    }
}

/// Failure returned by a [`Summarizer`](crate::agent::Summarizer).
#[derive(Debug, Error)]
#[error("Error communicating with LLM: {0}")]
pub struct SummaryError(pub String);
