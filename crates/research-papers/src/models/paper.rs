//! Normalized and augmented paper models.

use serde::{Deserialize, Serialize};

use super::Augmentation;

/// A raw record that passed normalization, before augmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPaper {
    /// Paper title (non-empty).
    pub title: String,

    /// Paper abstract (non-empty).
    pub r#abstract: String,

    /// Link to the paper, or `"#"` when none could be derived.
    pub url: String,

    /// Publication year.
    pub year: Option<i64>,

    /// Author names in publication order.
    pub authors: Vec<String>,

    /// Number of citations.
    pub citation_count: Option<i64>,
}

impl NormalizedPaper {
    /// Attach augmentation output, producing the final paper.
    #[must_use]
    pub fn augment(self, summary: Augmentation, insights: Augmentation) -> Paper {
        Paper {
            title: self.title,
            r#abstract: self.r#abstract,
            url: self.url,
            year: self.year,
            authors: self.authors,
            citation_count: self.citation_count,
            summary: summary.into_text(),
            insights: insights.into_text(),
        }
    }
}

/// A research paper with generated summary and insights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Paper title.
    pub title: String,

    /// Paper abstract.
    pub r#abstract: String,

    /// Link to the paper, or `"#"`.
    pub url: String,

    /// Publication year.
    #[serde(default)]
    pub year: Option<i64>,

    /// Author names.
    #[serde(default)]
    pub authors: Vec<String>,

    /// Number of citations.
    #[serde(default)]
    pub citation_count: Option<i64>,

    /// Generated summary, or its failure placeholder.
    pub summary: String,

    /// Generated bullet-point insights, or their failure placeholder.
    pub insights: String,
}

impl Paper {
    /// Get author names as a comma-separated string.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors.join(", ")
    }

    /// Whether the paper links anywhere.
    #[must_use]
    pub fn has_link(&self) -> bool {
        self.url != "#"
    }
}

/// Response body of the fetch operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PapersResponse {
    /// Augmented papers in search-result order.
    pub papers: Vec<Paper>,
}
