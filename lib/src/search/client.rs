//! Brave Search client.
//!
//! Performs one HTTP GET per call and reports every failure through
//! [`SearchOutcome::Failed`]. Only construction can return an error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use search_agent_lib::{SearchClient, SearchConfig, SearchOutcome, SearchRequest};
//!
//! # async fn run() -> Result<(), search_agent_lib::ConfigError> {
//! let client = SearchClient::new(SearchConfig::default())?;
//!
//! match client.async_search(SearchRequest::new("rust").with_count(5)).await {
//!     SearchOutcome::Results(results) => {
//!         for result in results {
//!             println!("{}: {}", result.title, result.url);
//!         }
//!     }
//!     SearchOutcome::Failed(e) => eprintln!("{}", e.error),
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::normalize::parse_body;
use super::types::{SearchOutcome, SearchRequest, SearchResult};
use crate::config::SearchConfig;
use crate::error::{ConfigError, SearchError};

/// Header carrying the API key
pub const SUBSCRIPTION_TOKEN_HEADER: &str = "x-subscription-token";

/// Stateless client for the Brave Search web endpoint.
///
/// Holds only configuration. Every call builds its own HTTP client without
/// an idle pool, so connections are released when the call returns and
/// clones can be used concurrently.
#[derive(Clone)]
pub struct SearchClient {
    token: HeaderValue,
    endpoint: Url,
    timeout: Duration,
}

impl SearchClient {
    /// Create a client, resolving the credential from the config's chain.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::MissingCredential` when no credential source
    /// yields a key, `ConfigError::InvalidCredential` when the key is not a
    /// valid header value and `ConfigError::InvalidEndpoint` for a bad URL.
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        let api_key = config.resolve_credential()?;
        let endpoint = config.endpoint_url()?;

        let mut token =
            HeaderValue::from_str(&api_key).map_err(|e| ConfigError::InvalidCredential {
                reason: e.to_string(),
            })?;
        token.set_sensitive(true);

        info!(
            endpoint = %endpoint,
            timeout_secs = config.timeout.as_secs_f64(),
            "Brave Search configured"
        );

        Ok(Self {
            token,
            endpoint,
            timeout: config.timeout,
        })
    }

    /// Create a client from `BRAVE_API_KEY` with default settings.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::MissingCredential` if `BRAVE_API_KEY` is unset
    /// or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(SearchConfig::default())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Search, blocking the current thread until the response arrives.
    ///
    /// Every failure is reported as [`SearchOutcome::Failed`].
    ///
    /// ## Panics
    ///
    /// Panics when called from inside an async runtime's worker thread,
    /// since `reqwest::blocking` cannot run there. Use
    /// [`Self::async_search`] from async code, or wrap this call in
    /// `tokio::task::spawn_blocking`.
    pub fn search(&self, request: impl Into<SearchRequest>) -> SearchOutcome {
        let request = request.into();
        self.run_blocking(&request)
    }

    /// Search without blocking the caller.
    ///
    /// Produces exactly what [`Self::search`] would for the same response.
    pub async fn async_search(&self, request: impl Into<SearchRequest>) -> SearchOutcome {
        let request = request.into();
        self.run_async(&request).await
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(SUBSCRIPTION_TOKEN_HEADER),
            self.token.clone(),
        );
        headers
    }

    #[instrument(
        name = "brave_search",
        skip(self, request),
        fields(
            tool.query = %request.query,
            tool.count = request.count,
            tool.offset = request.offset,
            mode = "blocking",
            otel.kind = "client"
        )
    )]
    fn run_blocking(&self, request: &SearchRequest) -> SearchOutcome {
        let start = Instant::now();
        finish(self.fetch_blocking(request), start)
    }

    #[instrument(
        name = "brave_search",
        skip(self, request),
        fields(
            tool.query = %request.query,
            tool.count = request.count,
            tool.offset = request.offset,
            mode = "async",
            otel.kind = "client"
        )
    )]
    async fn run_async(&self, request: &SearchRequest) -> SearchOutcome {
        let start = Instant::now();
        finish(self.fetch_async(request).await, start)
    }

    fn fetch_blocking(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, SearchError> {
        request.validate()?;

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .pool_max_idle_per_host(0)
            .build()?;

        let response = client
            .get(self.endpoint.clone())
            .headers(self.headers())
            .query(&request.query_params())
            .send()?;

        let status = response.status();
        debug!(http.status_code = status.as_u16(), "Received API response");

        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(SearchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        parse_body(&response.bytes()?)
    }

    async fn fetch_async(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, SearchError> {
        request.validate()?;

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .pool_max_idle_per_host(0)
            .build()?;

        let response = client
            .get(self.endpoint.clone())
            .headers(self.headers())
            .query(&request.query_params())
            .send()
            .await?;

        let status = response.status();
        debug!(http.status_code = status.as_u16(), "Received API response");

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(SearchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        parse_body(&response.bytes().await?)
    }
}

/// Log the result of a call and fold any error into the sentinel.
fn finish(result: Result<Vec<SearchResult>, SearchError>, start: Instant) -> SearchOutcome {
    let elapsed_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(results) => {
            info!(
                tool.results_count = results.len(),
                tool.duration_ms = elapsed_ms,
                "Search completed"
            );
            SearchOutcome::Results(results)
        }
        Err(error) => {
            warn!(error = %error, tool.duration_ms = elapsed_ms, "Search failed");
            SearchOutcome::from(error)
        }
    }
}

impl fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
