//! End-to-end pipeline tests against stub providers.
//!
//! Stubs count their calls so tests can assert which external calls happen.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::{Value, json};

use research_papers::client::{CompletionProvider, SearchProvider};
use research_papers::error::{
    ClientError, ClientResult, CompletionError, CompletionResult, PipelineError,
};
use research_papers::models::Query;
use research_papers::pipeline::Pipeline;

/// Search stub returning a fixed response (or failure).
struct StubSearch {
    response: Result<Value, u16>,
    calls: AtomicUsize,
}

impl StubSearch {
    fn returning(response: Value) -> Arc<Self> {
        Arc::new(Self { response: Ok(response), calls: AtomicUsize::new(0) })
    }

    fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self { response: Err(status), calls: AtomicUsize::new(0) })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SearchProvider for StubSearch {
    async fn query(&self, _text: &str, _limit: usize) -> ClientResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(value) => Ok(value.clone()),
            Err(status) => Err(ClientError::server(*status, "search backend down")),
        }
    }
}

/// Completion stub echoing a tag of the prompt, or failing on demand.
struct StubCompletion {
    fail: bool,
    delay_first: bool,
    calls: AtomicUsize,
}

impl StubCompletion {
    fn ok() -> Arc<Self> {
        Arc::new(Self { fail: false, delay_first: false, calls: AtomicUsize::new(0) })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self { fail: true, delay_first: false, calls: AtomicUsize::new(0) })
    }

    fn slow_start() -> Arc<Self> {
        Arc::new(Self { fail: false, delay_first: true, calls: AtomicUsize::new(0) })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CompletionProvider for StubCompletion {
    async fn complete(&self, prompt: &str) -> CompletionResult<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_first && call == 0 {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        if self.fail {
            return Err(CompletionError::Api { status: 503, message: "overloaded".to_string() });
        }
        let kind = if prompt.contains("Summarize") { "summary" } else { "insights" };
        Ok(format!("  {kind} ok  "))
    }

    fn model_id(&self) -> &str {
        "stub-model"
    }
}

fn paper(i: usize) -> Value {
    json!({
        "paperId": format!("id{i}"),
        "title": format!("Paper {i}"),
        "abstract": format!("Abstract {i}"),
        "year": 2020,
        "citationCount": i,
        "authors": [{"name": format!("Author {i}")}]
    })
}

fn papers(n: usize) -> Value {
    json!({ "data": (1..=n).map(paper).collect::<Vec<_>>() })
}

// =============================================================================
// Happy path
// =============================================================================

#[tokio::test]
async fn test_limit_and_order_preserved() {
    let search = StubSearch::returning(papers(7));
    let completion = StubCompletion::ok();
    let pipeline = Pipeline::new(search.clone(), completion.clone());

    let response = pipeline.run(&Query::new("graph neural networks", 5)).await.unwrap();

    assert!(response.papers.len() <= 5);
    let titles: Vec<_> = response.papers.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Paper 1", "Paper 2", "Paper 3", "Paper 4", "Paper 5"]);
    assert_eq!(search.calls(), 1);
    // Two completions per paper.
    assert_eq!(completion.calls(), 10);
}

#[tokio::test]
async fn test_papers_are_fully_populated() {
    let pipeline = Pipeline::new(StubSearch::returning(papers(1)), StubCompletion::ok());

    let response = pipeline.run(&Query::new("transformers", 10)).await.unwrap();
    let paper = &response.papers[0];

    assert_eq!(paper.url, "https://www.semanticscholar.org/paper/id1");
    assert_eq!(paper.authors, vec!["Author 1"]);
    assert_eq!(paper.year, Some(2020));
    assert_eq!(paper.citation_count, Some(1));
    assert_eq!(paper.summary, "summary ok");
    assert_eq!(paper.insights, "insights ok");
}

#[tokio::test]
async fn test_malformed_records_skipped() {
    let response = json!({"data": [
        paper(1),
        {"title": "No abstract"},
        "not an object",
        {"abstract": "No title"},
        paper(2)
    ]});
    let completion = StubCompletion::ok();
    let pipeline = Pipeline::new(StubSearch::returning(response), completion.clone());

    let result = pipeline.run(&Query::new("test", 10)).await.unwrap();

    let titles: Vec<_> = result.papers.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Paper 1", "Paper 2"]);
    // Only survivors are augmented.
    assert_eq!(completion.calls(), 4);
}

#[tokio::test]
async fn test_string_response_wrapped_and_augmented() {
    let completion = StubCompletion::ok();
    let pipeline = Pipeline::new(StubSearch::returning(json!("rate limited")), completion.clone());

    let result = pipeline.run(&Query::new("test", 10)).await.unwrap();

    assert_eq!(result.papers.len(), 1);
    assert_eq!(result.papers[0].title, "Error");
    assert_eq!(result.papers[0].r#abstract, "rate limited");
    assert_eq!(result.papers[0].url, "#");
    assert_eq!(completion.calls(), 2);
}

// =============================================================================
// Degradation
// =============================================================================

#[tokio::test]
async fn test_augmentation_failure_degrades_per_paper() {
    let completion = StubCompletion::failing();
    let pipeline = Pipeline::new(StubSearch::returning(papers(3)), completion.clone());

    let result = pipeline.run(&Query::new("test", 10)).await.unwrap();

    assert_eq!(result.papers.len(), 3);
    for paper in &result.papers {
        assert_eq!(paper.summary, "Summary generation failed");
        assert_eq!(paper.insights, "Insight extraction failed");
    }
    // Both calls are still issued for every paper.
    assert_eq!(completion.calls(), 6);
}

// =============================================================================
// Request-level failures
// =============================================================================

#[tokio::test]
async fn test_empty_query_never_searches() {
    let search = StubSearch::returning(papers(3));
    let completion = StubCompletion::ok();
    let pipeline = Pipeline::new(search.clone(), completion.clone());

    let err = pipeline.run(&Query { text: String::new(), limit: None }).await.unwrap_err();
    assert!(matches!(err, PipelineError::InvalidQuery));

    let err = pipeline.run(&Query::new("   ", 5)).await.unwrap_err();
    assert!(matches!(err, PipelineError::InvalidQuery));

    assert_eq!(search.calls(), 0);
    assert_eq!(completion.calls(), 0);
}

#[tokio::test]
async fn test_empty_search_is_no_results() {
    let pipeline = Pipeline::new(StubSearch::returning(json!({"data": []})), StubCompletion::ok());

    let err = pipeline.run(&Query::new("nothing matches", 10)).await.unwrap_err();
    assert!(matches!(err, PipelineError::NoResults));
}

#[tokio::test]
async fn test_all_records_rejected_is_no_results() {
    let response = json!({"data": [{"title": "only title"}, {"abstract": "only abstract"}]});
    let completion = StubCompletion::ok();
    let pipeline = Pipeline::new(StubSearch::returning(response), completion.clone());

    let err = pipeline.run(&Query::new("test", 10)).await.unwrap_err();
    assert!(matches!(err, PipelineError::NoResults));
    assert_eq!(completion.calls(), 0);
}

#[tokio::test]
async fn test_search_failure_is_search_unavailable() {
    let completion = StubCompletion::ok();
    let pipeline = Pipeline::new(StubSearch::failing(503), completion.clone());

    let err = pipeline.run(&Query::new("test", 10)).await.unwrap_err();

    assert!(matches!(err, PipelineError::SearchUnavailable(_)));
    assert!(err.to_user_message().contains("search backend down"));
    assert_eq!(completion.calls(), 0);
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn test_concurrent_augmentation_preserves_order() {
    // The first completion call is slow, so the first paper finishes last.
    let completion = StubCompletion::slow_start();
    let pipeline =
        Pipeline::new(StubSearch::returning(papers(4)), completion.clone()).with_concurrency(4);

    let result = pipeline.run(&Query::new("test", 10)).await.unwrap();

    let titles: Vec<_> = result.papers.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Paper 1", "Paper 2", "Paper 3", "Paper 4"]);
    assert_eq!(completion.calls(), 8);
}

#[tokio::test]
async fn test_zero_concurrency_treated_as_sequential() {
    let pipeline =
        Pipeline::new(StubSearch::returning(papers(2)), StubCompletion::ok()).with_concurrency(0);

    let result = pipeline.run(&Query::new("test", 10)).await.unwrap();
    assert_eq!(result.papers.len(), 2);
}
