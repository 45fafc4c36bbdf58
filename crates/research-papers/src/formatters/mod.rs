//! Output formatters for augmented papers.

mod markdown;

pub use markdown::{format_paper_markdown, format_papers_markdown};
