//! Untyped search records as returned by the literature-search provider.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// An unvalidated paper entry.
///
/// Any field may be missing, null, or of the wrong type; the normalizer
/// decides what survives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Value);

impl RawRecord {
    /// Wrap a JSON value.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Pseudo-record standing in for a free-text provider response.
    #[must_use]
    pub fn error_message(message: impl Into<String>) -> Self {
        Self(json!({ "title": "Error", "abstract": message.into() }))
    }

    /// The record as a JSON object, if it is one.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }

    /// Look up a field; `None` for missing fields and non-object records.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Borrow the underlying value.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }
}
