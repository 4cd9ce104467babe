//! Search Agent Library - Brave web search with optional LLM analysis
//!
//! The core is [`SearchClient`], which performs a single Brave Search request
//! and normalizes the response into [`SearchResult`]s. Failures never surface
//! as `Err`; they come back as [`SearchOutcome::Failed`].
//!
//! Around it sit:
//!
//! - [`config`] - explicit configuration and the credential precedence chain
//! - [`agent`] - a [`SearchAgent`] that can hand the top results to a
//!   [`Summarizer`](agent::Summarizer)
//! - [`tool`] - the client exposed as a rig-core tool

pub mod agent;
pub mod config;
pub mod error;
pub mod search;
pub mod tool;

pub use agent::{AgentReport, Analyst, SearchAgent};
pub use config::{CredentialSource, SearchConfig};
pub use error::{ConfigError, SearchError, SummaryError};
pub use search::{ErrorResult, SearchClient, SearchOutcome, SearchRequest, SearchResult};
pub use tool::SearchArgs;
