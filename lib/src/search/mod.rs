//! Web search against the Brave Search API.
//!
//! - [`SearchClient`] issues requests in blocking or async mode
//! - [`normalize`] maps the response body into [`SearchResult`]s
//! - [`SearchOutcome`] is what every call returns

mod client;
pub mod normalize;
mod types;

pub use client::{SUBSCRIPTION_TOKEN_HEADER, SearchClient};
pub use types::{
    DEFAULT_COUNT, ErrorResult, NO_DESCRIPTION, NO_TITLE, SearchOutcome, SearchRecord,
    SearchRequest, SearchResult,
};
