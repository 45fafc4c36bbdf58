//! Error types for the research paper service.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

/// Errors from the literature-search client.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by Semantic Scholar API (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Wait time suggested by the provider
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// HTTP status reported by the provider, if the failure carried one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::BadRequest { .. } => Some(400),
            Self::Server { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from the LLM completion client.
#[derive(thiserror::Error, Debug)]
pub enum CompletionError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Non-success response from the completion API
    #[error("Completion API error [{status}]: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message extracted from the response body
        message: String,
    },

    /// Response body could not be decoded
    #[error("Failed to parse completion: {0}")]
    Parse(#[from] serde_json::Error),

    /// Response decoded but carried no generated text
    #[error("Completion response contained no text")]
    EmptyCompletion,
}

/// Request-level failures of the augmentation pipeline.
///
/// Per-paper augmentation failures never show up here; they degrade to a
/// placeholder (see [`crate::models::Augmentation`]).
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// Query text was empty or whitespace.
    #[error("Search query cannot be empty")]
    InvalidQuery,

    /// The literature-search provider failed.
    #[error("Literature search failed: {0}")]
    SearchUnavailable(#[from] ClientError),

    /// Search succeeded but no usable paper survived normalization.
    #[error("No papers found matching your query")]
    NoResults,

    /// Unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PipelineError {
    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status code for this failure.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidQuery => 400,
            Self::NoResults => 404,
            Self::SearchUnavailable(_) | Self::Internal(_) => 500,
        }
    }

    /// Message returned to callers.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::SearchUnavailable(ClientError::RateLimited { retry_after }) => {
                format!(
                    "Literature search failed: rate limited by Semantic Scholar, retry after {:?}",
                    retry_after
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for search client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for completion client operations.
pub type CompletionResult<T> = Result<T, CompletionError>;

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
