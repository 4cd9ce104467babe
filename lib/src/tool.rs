//! [`SearchClient`] as a rig-core tool.
//!
//! ```rust,ignore
//! use rig::tool::ToolSet;
//! use search_agent_lib::SearchClient;
//!
//! let toolset = ToolSet::builder()
//!     .static_tool(SearchClient::from_env()?)
//!     .build();
//! ```

use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::search::{DEFAULT_COUNT, SearchClient, SearchOutcome, SearchRequest, SearchResult};

/// Arguments an agent passes to the `brave_search` tool.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SearchArgs {
    /// The search query string
    pub query: String,

    /// Number of results to return (1-20, default: 10)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    /// Offset for pagination (0-9, default: 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl From<SearchArgs> for SearchRequest {
    fn from(args: SearchArgs) -> Self {
        SearchRequest::new(args.query)
            .with_count(args.count.unwrap_or(DEFAULT_COUNT))
            .with_offset(args.offset.unwrap_or_default())
    }
}

impl Tool for SearchClient {
    const NAME: &'static str = "brave_search";

    type Error = SearchError;
    type Args = SearchArgs;
    type Output = Vec<SearchResult>;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Search the web using Brave Search API. Returns relevant web pages \
                with titles, URLs, and descriptions. Use this tool when you need to find \
                current information from the internet, research topics, or verify facts."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query string"
                    },
                    "count": {
                        "type": "integer",
                        "description": "Number of results to return (1-20, default: 10)",
                        "minimum": 1,
                        "maximum": 20
                    },
                    "offset": {
                        "type": "integer",
                        "description": "Offset for pagination (0-9, default: 0)",
                        "minimum": 0,
                        "maximum": 9
                    }
                },
                "required": ["query"]
            }),
        }
    }

    /// Rig tools report failure through `Err`, so a failed outcome becomes
    /// `SearchError::Failed` carrying the sentinel message.
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        match self.async_search(args).await {
            SearchOutcome::Results(results) => Ok(results),
            SearchOutcome::Failed(e) => Err(SearchError::Failed(e.error)),
        }
    }
}
