//! Research Paper Service
//!
//! Searches Semantic Scholar for a natural-language research query and
//! augments every paper found with an LLM-generated summary and a
//! bullet-point list of key insights.
//!
//! # Pipeline
//!
//! - **Search**: one Semantic Scholar request, truncated to the query limit
//! - **Normalize**: loosely-typed records decoded into typed papers; malformed ones dropped
//! - **Augment**: two completion calls per paper, degrading to placeholders on failure
//! - **Assemble**: papers returned in search order
//!
//! # Example
//!
//! ```no_run
//! use research_papers::{Config, Pipeline, models::Query};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let pipeline = Pipeline::from_config(&config)?;
//!
//!     let response = pipeline.run(&Query::new("graph neural networks", 5)).await?;
//!     for paper in response.papers {
//!         println!("{}: {}", paper.title, paper.summary);
//!     }
//!     Ok(())
//! }
//! ```

pub mod augment;
pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod search;
pub mod server;

pub use client::{OpenAiClient, SemanticScholarClient};
pub use config::Config;
pub use error::{ClientError, CompletionError, PipelineError};
pub use pipeline::Pipeline;
