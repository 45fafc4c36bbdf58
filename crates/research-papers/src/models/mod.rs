//! Data models for queries, raw search records, and augmented papers.
//!
//! Outbound models use `#[serde(rename_all = "camelCase")]` to match the
//! field names the presentation layer reads.

mod augmentation;
mod paper;
mod query;
mod record;

pub use augmentation::{Augmentation, AugmentationKind};
pub use paper::{NormalizedPaper, Paper, PapersResponse};
pub use query::{DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT, Query, ValidQuery};
pub use record::RawRecord;
