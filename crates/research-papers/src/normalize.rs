//! Decoding of raw search records into typed papers.
//!
//! Provider records are loosely typed, so every field is checked explicitly.
//! A record either becomes a [`NormalizedPaper`] or is dropped with a
//! [`Rejection`] naming why.

use serde_json::Value;

use crate::config::api;
use crate::models::{NormalizedPaper, RawRecord};

/// Why a raw record was dropped.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The record is not a JSON object.
    #[error("record is not an object")]
    NotAnObject,

    /// Title is absent, null, not a string, or blank.
    #[error("record has no title")]
    MissingTitle,

    /// Abstract is absent, null, not a string, or blank.
    #[error("record has no abstract")]
    MissingAbstract,
}

/// Normalize one raw record.
///
/// # Errors
///
/// Returns the [`Rejection`] reason when the record is unusable.
pub fn normalize(raw: &RawRecord) -> Result<NormalizedPaper, Rejection> {
    if raw.as_object().is_none() {
        return Err(Rejection::NotAnObject);
    }

    let title = non_blank_str(raw.get("title")).ok_or(Rejection::MissingTitle)?;
    let r#abstract = non_blank_str(raw.get("abstract")).ok_or(Rejection::MissingAbstract)?;

    Ok(NormalizedPaper {
        title: title.to_string(),
        r#abstract: r#abstract.to_string(),
        url: derive_url(raw),
        year: raw.get("year").and_then(Value::as_i64),
        authors: derive_authors(raw.get("authors")),
        citation_count: match raw.get("citationCount") {
            None => Some(0),
            Some(value) => value.as_i64(),
        },
    })
}

/// Normalize a batch, keeping survivors in order and logging each drop.
#[must_use]
pub fn normalize_all(records: &[RawRecord]) -> Vec<NormalizedPaper> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match normalize(raw) {
            Ok(paper) => Some(paper),
            Err(reason) => {
                tracing::debug!(index, %reason, "Skipping malformed search record");
                None
            }
        })
        .collect()
}

/// Link for a record: its own URL, else its Semantic Scholar page, else `"#"`.
#[must_use]
pub fn derive_url(raw: &RawRecord) -> String {
    if let Some(url) = non_blank_str(raw.get("url")) {
        return url.to_string();
    }

    let paper_id = match raw.get("paperId") {
        Some(Value::String(id)) if !id.trim().is_empty() => Some(id.trim().to_string()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    };

    paper_id.map_or_else(|| "#".to_string(), |id| format!("{}/{}", api::PAPER_PAGE, id))
}

/// Author names from a raw `authors` value.
///
/// Object entries contribute their `name`; other entries are stringified, as are
/// non-string names.
/// Falsy entries and empty names are dropped.
#[must_use]
pub fn derive_authors(authors: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(entries)) = authors else {
        return Vec::new();
    };

    entries
        .iter()
        .filter(|entry| is_truthy(entry))
        .map(|entry| match entry {
            Value::Object(author) => {
                author
                    .get("name")
                    .filter(|name| is_truthy(name))
                    .map(display_name)
                    .unwrap_or_default()
            }
            other => display_name(other),
        })
        .filter(|name| !name.is_empty())
        .collect()
}

/// A string value with some non-whitespace content, returned as-is.
fn non_blank_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.trim().is_empty())
}

fn display_name(value: &Value) -> String {
    match value {
        Value::String(name) => name.trim().to_string(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
