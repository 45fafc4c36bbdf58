//! Query → search → normalize → augment → assemble.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::augment::Augmenter;
use crate::client::{CompletionProvider, OpenAiClient, SearchProvider, SemanticScholarClient};
use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::models::{PapersResponse, Query};
use crate::normalize::normalize_all;
use crate::search::SearchClient;

/// The paper ingestion-and-augmentation pipeline.
///
/// Holds no per-request state; one instance serves every request.
#[derive(Clone)]
pub struct Pipeline {
    search: SearchClient,
    augmenter: Augmenter,
    concurrency: usize,
}

impl Pipeline {
    /// Create a pipeline over the given providers, augmenting one paper at a time.
    #[must_use]
    pub fn new(search: Arc<dyn SearchProvider>, completion: Arc<dyn CompletionProvider>) -> Self {
        Self {
            search: SearchClient::new(search),
            augmenter: Augmenter::new(completion),
            concurrency: 1,
        }
    }

    /// Build a pipeline with the real Semantic Scholar and completion clients.
    ///
    /// # Errors
    ///
    /// Returns error if an HTTP client cannot be initialized.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let search = SemanticScholarClient::new(config)?;
        let completion = OpenAiClient::new(config)?;
        Ok(Self::new(Arc::new(search), Arc::new(completion))
            .with_concurrency(config.augment_concurrency))
    }

    /// Augment up to `concurrency` papers at once. Output order is unaffected.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Run one query through the pipeline.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::InvalidQuery`] for blank query text (no search is made)
    /// - [`PipelineError::SearchUnavailable`] when the search provider fails
    /// - [`PipelineError::NoResults`] when no record survives normalization
    pub async fn run(&self, query: &Query) -> PipelineResult<PapersResponse> {
        let query = query.validate()?;
        tracing::info!(query = query.text(), limit = query.limit(), "Running paper pipeline");

        let records = self.search.search(query.text(), query.limit()).await.map_err(|err| {
            tracing::error!(error = %err, "Literature search failed");
            PipelineError::SearchUnavailable(err)
        })?;

        let drafts = normalize_all(&records);
        tracing::debug!(
            records = records.len(),
            survivors = drafts.len(),
            "Normalized search records"
        );

        if drafts.is_empty() {
            return Err(PipelineError::NoResults);
        }

        let papers: Vec<_> = stream::iter(drafts)
            .map(|draft| self.augmenter.augment(draft))
            .buffered(self.concurrency)
            .collect()
            .await;

        tracing::info!(papers = papers.len(), "Paper pipeline complete");
        Ok(PapersResponse { papers })
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("augmenter", &self.augmenter)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}
