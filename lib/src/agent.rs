//! Search agent with optional LLM analysis.
//!
//! A [`SearchAgent`] forwards a query to its [`SearchClient`] and, when an
//! [`Analyst`] is configured, hands the first few results to a
//! [`Summarizer`]. The summarizer is opaque: anything that can turn a prompt
//! into text will do. Analysis failures are logged and never change the
//! search outcome.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{debug, error, info, instrument};

use crate::error::SummaryError;
use crate::search::{SearchClient, SearchOutcome, SearchRequest, SearchResult};

/// Name given to agents that are not explicitly named.
pub const DEFAULT_AGENT_NAME: &str = "Search Specialist";

/// How many results are included in the analysis prompt.
pub const ANALYSIS_RESULT_LIMIT: usize = 3;

/// Turns a prompt into generated text.
pub trait Summarizer: Send + Sync {
    fn summarize<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, SummaryError>>;
}

/// Whether, and by whom, search results are analyzed.
#[derive(Clone, Default)]
pub enum Analyst {
    #[default]
    Disabled,
    Summarize(Arc<dyn Summarizer>),
}

impl Analyst {
    pub fn summarizer(summarizer: impl Summarizer + 'static) -> Self {
        Self::Summarize(Arc::new(summarizer))
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Summarize(_))
    }
}

impl fmt::Debug for Analyst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Summarize(_) => f.write_str("Summarize(..)"),
        }
    }
}

/// The outcome of a task plus the analysis, when one was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReport {
    pub outcome: SearchOutcome,
    pub analysis: Option<String>,
}

/// Build the prompt sent to the summarizer.
///
/// Only the first [`ANALYSIS_RESULT_LIMIT`] results are included.
pub fn analysis_prompt(query: &str, results: &[SearchResult]) -> String {
    let listing = results
        .iter()
        .take(ANALYSIS_RESULT_LIMIT)
        .enumerate()
        .map(|(i, r)| {
            format!(
                "{}. {}\n   URL: {}\n   {}",
                i + 1,
                r.title,
                r.url,
                r.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Analyze the following search results for the query: '{query}'\n\n\
         {listing}\n\n\
         Provide a brief summary of the key information found:"
    )
}

/// Performs web searches on behalf of a caller.
#[derive(Debug, Clone)]
pub struct SearchAgent {
    name: String,
    client: SearchClient,
    analyst: Analyst,
}

impl SearchAgent {
    pub fn new(client: SearchClient) -> Self {
        Self {
            name: DEFAULT_AGENT_NAME.to_string(),
            client,
            analyst: Analyst::Disabled,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_analyst(mut self, analyst: Analyst) -> Self {
        self.analyst = analyst;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn client(&self) -> &SearchClient {
        &self.client
    }

    pub fn analyst(&self) -> &Analyst {
        &self.analyst
    }

    /// Search and return the outcome unchanged.
    ///
    /// Analysis, if configured, still runs and is logged.
    pub async fn perform_task(&self, request: impl Into<SearchRequest>) -> SearchOutcome {
        self.perform_task_with_analysis(request).await.outcome
    }

    /// Search and, for a non-empty result list, run analysis.
    pub async fn perform_task_with_analysis(
        &self,
        request: impl Into<SearchRequest>,
    ) -> AgentReport {
        self.run_task(request.into()).await
    }

    #[instrument(name = "search_agent", skip(self, request), fields(agent = %self.name))]
    async fn run_task(&self, request: SearchRequest) -> AgentReport {
        let query = request.query.as_str();
        info!(query, "Search started");

        let outcome = self.client.async_search(&request).await;

        info!(
            query,
            result_count = outcome.results().len(),
            failed = outcome.is_failed(),
            "Search completed"
        );

        let analysis = match (&self.analyst, &outcome) {
            (Analyst::Summarize(summarizer), SearchOutcome::Results(results))
                if !results.is_empty() =>
            {
                let prompt = analysis_prompt(query, results);
                match summarizer.summarize(&prompt).await {
                    Ok(summary) => {
                        debug!(summary_len = summary.len(), "LLM analysis completed");
                        Some(summary)
                    }
                    Err(e) => {
                        error!(query, error = %e, "LLM analysis failed");
                        None
                    }
                }
            }
            _ => None,
        };

        AgentReport { outcome, analysis }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use serde_json::json;
    use std::sync::Mutex;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Records every prompt and answers with a fixed summary.
    #[derive(Default)]
    struct RecordingSummarizer {
        prompts: Mutex<Vec<String>>,
    }

    impl Summarizer for RecordingSummarizer {
        fn summarize<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, SummaryError>> {
            Box::pin(async move {
                self.prompts.lock().unwrap().push(prompt.to_string());
                Ok("cheap groceries are at the market".to_string())
            })
        }
    }

    struct FailingSummarizer;

    impl Summarizer for FailingSummarizer {
        fn summarize<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, Result<String, SummaryError>> {
            Box::pin(async { Err(SummaryError("model unavailable".to_string())) })
        }
    }

    fn result(n: usize) -> SearchResult {
        SearchResult {
            title: format!("Result {n}"),
            url: format!("https://example.com/{n}"),
            description: format!("Description {n}"),
        }
    }

    fn five_results() -> serde_json::Value {
        let items: Vec<_> = (1..=5)
            .map(|n| {
                json!({
                    "title": format!("Result {n}"),
                    "url": format!("https://example.com/{n}"),
                    "description": format!("Description {n}")
                })
            })
            .collect();
        json!({ "web": { "results": items } })
    }

    async fn agent_for(server: &MockServer) -> SearchAgent {
        let config = SearchConfig::new("test-key").with_endpoint(format!("{}/search", server.uri()));
        SearchAgent::new(SearchClient::new(config).unwrap())
    }

    #[test]
    fn test_analysis_prompt_uses_top_three() {
        let results: Vec<_> = (1..=5).map(result).collect();
        let prompt = analysis_prompt("groceries", &results);

        assert!(prompt.contains("for the query: 'groceries'"));
        assert!(prompt.contains("1. Result 1"));
        assert!(prompt.contains("3. Result 3"));
        assert!(prompt.contains("URL: https://example.com/2"));
        assert!(!prompt.contains("Result 4"));
        assert!(prompt.ends_with("Provide a brief summary of the key information found:"));
    }

    #[test]
    fn test_analyst_default_is_disabled() {
        assert!(!Analyst::default().is_enabled());
        assert!(Analyst::summarizer(FailingSummarizer).is_enabled());
        assert_eq!(format!("{:?}", Analyst::Disabled), "Disabled");
    }

    #[tokio::test]
    async fn test_agent_defaults() {
        let server = MockServer::start().await;
        let agent = agent_for(&server).await;

        assert_eq!(agent.name(), "Search Specialist");
        assert!(!agent.analyst().is_enabled());
        assert_eq!(agent.with_name("Scout").name(), "Scout");
    }

    #[tokio::test]
    async fn test_perform_task_without_analyst() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(five_results()))
            .expect(1)
            .mount(&server)
            .await;

        let agent = agent_for(&server).await;
        let report = agent.perform_task_with_analysis("groceries").await;

        assert_eq!(report.outcome.results().len(), 5);
        assert_eq!(report.analysis, None);
    }

    #[tokio::test]
    async fn test_perform_task_with_summarizer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(five_results()))
            .mount(&server)
            .await;

        let summarizer = Arc::new(RecordingSummarizer::default());
        let agent = agent_for(&server)
            .await
            .with_analyst(Analyst::Summarize(summarizer.clone()));

        let report = agent.perform_task_with_analysis("groceries").await;

        assert_eq!(report.outcome.results().len(), 5);
        assert_eq!(
            report.analysis.as_deref(),
            Some("cheap groceries are at the market")
        );

        let prompts = summarizer.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Result 3"));
        assert!(!prompts[0].contains("Result 4"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_summarizer_failure_keeps_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(five_results()))
            .mount(&server)
            .await;

        let agent = agent_for(&server)
            .await
            .with_analyst(Analyst::summarizer(FailingSummarizer));

        let outcome = agent.perform_task("groceries").await;

        assert_eq!(outcome.results().len(), 5);
        assert!(logs_contain("LLM analysis failed"));
        assert!(logs_contain("model unavailable"));
    }

    #[tokio::test]
    async fn test_failed_search_skips_analysis() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let summarizer = Arc::new(RecordingSummarizer::default());
        let agent = agent_for(&server)
            .await
            .with_analyst(Analyst::Summarize(summarizer.clone()));

        let report = agent.perform_task_with_analysis("groceries").await;

        assert!(report.outcome.is_failed());
        assert_eq!(report.analysis, None);
        assert!(summarizer.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_perform_task_emits_tracing_events() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(five_results()))
            .mount(&server)
            .await;

        let agent = agent_for(&server).await;
        let _ = agent.perform_task("groceries").await;

        assert!(logs_contain("Search started"));
        assert!(logs_contain("result_count=5"));
    }
}
