//! Configuration for the search client.
//!
//! Nothing here reads the environment implicitly. A [`SearchConfig`] carries an
//! ordered chain of [`CredentialSource`]s and the first one yielding a
//! non-blank value wins. The default chain consults `BRAVE_API_KEY` only;
//! [`SearchConfig::with_api_key`] puts an explicit key ahead of it.
//!
//! ## Example
//!
//! ```
//! use search_agent_lib::config::SearchConfig;
//! use std::time::Duration;
//!
//! let config = SearchConfig::default()
//!     .with_api_key("my-key")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let key = config.resolve_credential_with(|_| None).unwrap();
//! assert_eq!(key, "my-key");
//! ```

use std::env;
use std::fmt;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::ConfigError;

/// Brave Search web endpoint
pub const BRAVE_SEARCH_ENDPOINT: &str = "https://api.search.brave.com/res/v1/web/search";

/// Environment variable consulted by the default credential chain
pub const BRAVE_API_KEY_ENV: &str = "BRAVE_API_KEY";

/// Transport timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One link in the credential precedence chain.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// A key handed to the config directly
    Explicit(String),
    /// The name of an environment variable holding the key
    Env(String),
}

impl CredentialSource {
    /// Human readable name of the source, safe to log.
    pub fn describe(&self) -> String {
        match self {
            Self::Explicit(_) => "explicit api key".to_string(),
            Self::Env(var) => format!("${var}"),
        }
    }

    fn lookup<F>(&self, lookup: &F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = match self {
            Self::Explicit(key) => Some(key.clone()),
            Self::Env(var) => lookup(var),
        }?;

        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(_) => f.write_str("Explicit(<redacted>)"),
            Self::Env(var) => f.debug_tuple("Env").field(var).finish(),
        }
    }
}

/// Settings held by a [`SearchClient`](crate::SearchClient).
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Credential sources, consulted in order
    pub credentials: Vec<CredentialSource>,
    /// API endpoint URL
    pub endpoint: String,
    /// Transport timeout applied to each request
    pub timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            credentials: vec![CredentialSource::Env(BRAVE_API_KEY_ENV.to_string())],
            endpoint: BRAVE_SEARCH_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SearchConfig {
    /// Config whose only credential source is the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            credentials: vec![CredentialSource::Explicit(api_key.into())],
            ..Self::default()
        }
    }

    /// Put an explicit key at the front of the credential chain.
    ///
    /// A blank key falls through to the remaining sources.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.credentials
            .insert(0, CredentialSource::Explicit(api_key.into()));
        self
    }

    /// Append an environment variable to the credential chain.
    #[must_use]
    pub fn with_env_var(mut self, var: impl Into<String>) -> Self {
        self.credentials.push(CredentialSource::Env(var.into()));
        self
    }

    /// Set a custom endpoint (useful for testing).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the credential against the process environment.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::MissingCredential` when no source yields a
    /// non-blank value.
    pub fn resolve_credential(&self) -> Result<String, ConfigError> {
        self.resolve_credential_with(|var| env::var(var).ok())
    }

    /// Resolve the credential using `lookup` for environment sources.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::MissingCredential` naming every source consulted.
    pub fn resolve_credential_with<F>(&self, lookup: F) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        for source in &self.credentials {
            if let Some(key) = source.lookup(&lookup) {
                debug!(source = %source.describe(), "Resolved search credential");
                return Ok(key);
            }
        }

        Err(ConfigError::MissingCredential {
            sources: self
                .credentials
                .iter()
                .map(CredentialSource::describe)
                .collect(),
        })
    }

    /// Parse the endpoint, accepting only absolute http(s) URLs.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::InvalidEndpoint` otherwise.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason,
        };

        let url = Url::parse(&self.endpoint).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(invalid(format!("unsupported scheme '{scheme}'"))),
        }
    }
}
