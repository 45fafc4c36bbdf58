//! LLM augmentation: summaries and key insights for paper abstracts.
//!
//! Completion failures never propagate. Each call yields an [`Augmentation`],
//! which is either the generated text or a fixed placeholder.

use std::sync::Arc;

use crate::client::CompletionProvider;
use crate::models::{Augmentation, AugmentationKind, NormalizedPaper, Paper};

const SUMMARY_PROMPT: &str = "Summarize the following research paper abstract in 3-4 sentences. \
Cover the research objectives, the methodology, and the key findings.\n\n\
Abstract:\n{abstract}\n\nSummary:";

const INSIGHTS_PROMPT: &str = "Extract 3-4 key insights or contributions from the following \
research paper abstract. Return them as a bullet-point list with one insight per line, \
each line starting with \"- \".\n\nAbstract:\n{abstract}\n\nKey insights:";

/// Build the prompt for an augmentation.
#[must_use]
pub fn prompt_for(kind: AugmentationKind, abstract_text: &str) -> String {
    let template = match kind {
        AugmentationKind::Summary => SUMMARY_PROMPT,
        AugmentationKind::Insights => INSIGHTS_PROMPT,
    };
    template.replace("{abstract}", abstract_text)
}

/// Issues summary and insight requests against a completion provider.
#[derive(Clone)]
pub struct Augmenter {
    provider: Arc<dyn CompletionProvider>,
}

impl Augmenter {
    /// Create an augmenter over the given provider.
    #[must_use]
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Short summary covering objectives, methodology, and key findings.
    pub async fn summarize(&self, abstract_text: &str) -> Augmentation {
        self.generate(AugmentationKind::Summary, abstract_text).await
    }

    /// Three to four bullet-point insights.
    pub async fn extract_insights(&self, abstract_text: &str) -> Augmentation {
        self.generate(AugmentationKind::Insights, abstract_text).await
    }

    /// Run both augmentations, one after the other, and build the final paper.
    pub async fn augment(&self, paper: NormalizedPaper) -> Paper {
        let summary = self.summarize(&paper.r#abstract).await;
        let insights = self.extract_insights(&paper.r#abstract).await;
        for outcome in [&summary, &insights] {
            if let Augmentation::Degraded { kind, reason } = outcome {
                tracing::warn!(
                    title = %paper.title,
                    augmentation = kind.as_str(),
                    model = self.provider.model_id(),
                    error = %reason,
                    "Augmentation degraded to placeholder"
                );
            }
        }
        paper.augment(summary, insights)
    }

    async fn generate(&self, kind: AugmentationKind, abstract_text: &str) -> Augmentation {
        let prompt = prompt_for(kind, abstract_text);
        match self.provider.complete(&prompt).await {
            Ok(text) => Augmentation::generated(&text),
            Err(err) => Augmentation::degraded(kind, err.to_string()),
        }
    }
}

impl std::fmt::Debug for Augmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Augmenter").field("model", &self.provider.model_id()).finish()
    }
}
