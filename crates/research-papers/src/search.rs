//! Search step: one provider call, shaped into an ordered list of raw records.

use std::sync::Arc;

use serde_json::Value;

use crate::client::SearchProvider;
use crate::error::ClientResult;
use crate::models::RawRecord;

/// Wraps a [`SearchProvider`] and turns its response into raw records.
#[derive(Clone)]
pub struct SearchClient {
    provider: Arc<dyn SearchProvider>,
}

impl SearchClient {
    /// Create a search client over the given provider.
    #[must_use]
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    /// Search and return at most `limit` raw records.
    ///
    /// # Errors
    ///
    /// Returns the provider's error when the call itself fails.
    pub async fn search(&self, query: &str, limit: usize) -> ClientResult<Vec<RawRecord>> {
        let response = self.provider.query(query, limit).await?;
        let records = records_from_response(response, limit);
        tracing::debug!(query, limit, records = records.len(), "Search returned");
        Ok(records)
    }
}

impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient").finish_non_exhaustive()
    }
}

/// Shape a provider response into records.
///
/// - a string becomes one `{title: "Error", abstract: <string>}` pseudo-record
/// - an array is truncated to `limit`
/// - an object with a `data` member is unwrapped and shaped the same way
/// - anything else yields no records
#[must_use]
pub fn records_from_response(response: Value, limit: usize) -> Vec<RawRecord> {
    match response {
        Value::String(message) => {
            tracing::warn!(message = %message, "Search provider returned text instead of results");
            vec![RawRecord::error_message(message)]
        }
        Value::Array(items) => items.into_iter().take(limit).map(RawRecord::new).collect(),
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(data @ (Value::Array(_) | Value::String(_))) => records_from_response(data, limit),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
