//! Inbound search query.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

/// Number of papers returned when the caller does not ask for a count.
pub const DEFAULT_LIMIT: u32 = 10;

/// Smallest accepted limit.
pub const MIN_LIMIT: u32 = 1;

/// Largest accepted limit.
pub const MAX_LIMIT: u32 = 50;

/// A research query as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Free-text research query.
    pub text: String,

    /// Maximum number of papers to return.
    #[serde(default)]
    pub limit: Option<u32>,
}

impl Query {
    /// Create a query with an explicit limit.
    #[must_use]
    pub fn new(text: impl Into<String>, limit: u32) -> Self {
        Self { text: text.into(), limit: Some(limit) }
    }

    /// Limit after applying the default and clamping into range.
    #[must_use]
    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(MIN_LIMIT, MAX_LIMIT)
    }

    /// Validate the query.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidQuery`] when the text is blank.
    pub fn validate(&self) -> PipelineResult<ValidQuery> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(PipelineError::InvalidQuery);
        }
        Ok(ValidQuery { text: text.to_string(), limit: self.effective_limit() as usize })
    }
}

/// A query that passed validation: trimmed non-empty text and an in-range limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidQuery {
    text: String,
    limit: usize,
}

impl ValidQuery {
    /// Trimmed query text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Limit in `MIN_LIMIT..=MAX_LIMIT`.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }
}
