//! Outbound HTTP clients.
//!
//! Provides:
//! - [`SemanticScholarClient`], the literature-search provider
//! - [`OpenAiClient`], an OpenAI-compatible completion provider
//! - Provider traits so the pipeline can run against stubs
//!
//! Every request is attempted exactly once and logged by [`RequestLogging`].

mod completion;
mod middleware;

use std::time::Duration;

use reqwest::Client;
use reqwest::header::HeaderMap;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde_json::Value;

pub use completion::{CompletionProvider, OpenAiClient};
pub use middleware::RequestLogging;

use crate::config::{Config, api, fields};
use crate::error::{ClientError, ClientResult};

/// A literature-search service.
///
/// Returns the provider's response body as-is; shaping it into records is
/// the job of [`crate::search::SearchClient`].
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run one search.
    async fn query(&self, text: &str, limit: usize) -> ClientResult<Value>;
}

/// Build a pooled HTTP client wrapped with request logging.
pub(crate) fn build_http_client(
    headers: HeaderMap,
    timeout: Duration,
    connect_timeout: Duration,
    provider: &'static str,
) -> anyhow::Result<ClientWithMiddleware> {
    let client = Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .pool_max_idle_per_host(api::MAX_KEEPALIVE)
        .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
        .gzip(true)
        .build()?;

    Ok(ClientBuilder::new(client).with(RequestLogging::new(provider)).build())
}

/// Semantic Scholar Graph API client.
#[derive(Clone)]
pub struct SemanticScholarClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// API key (optional).
    api_key: Option<String>,

    /// Graph API base URL.
    graph_api_url: String,

    /// Request timeout, reported on timeouts.
    timeout: Duration,
}

impl SemanticScholarClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(reqwest::header::ACCEPT, "application/json".parse()?);

        if let Some(ref key) = config.search_api_key {
            headers.insert("x-api-key", key.parse()?);
        }

        let client = build_http_client(
            headers,
            config.search_timeout,
            config.connect_timeout,
            "semantic_scholar",
        )?;

        Ok(Self {
            client,
            api_key: config.search_api_key.clone(),
            graph_api_url: config.search_api_url.trim_end_matches('/').to_string(),
            timeout: config.search_timeout,
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }

    fn transport_error(&self, err: reqwest_middleware::Error) -> ClientError {
        match err {
            reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => {
                ClientError::Timeout(self.timeout)
            }
            reqwest_middleware::Error::Reqwest(e) => ClientError::Http(e),
            other => ClientError::Middleware(other),
        }
    }
}

#[async_trait::async_trait]
impl SearchProvider for SemanticScholarClient {
    async fn query(&self, text: &str, limit: usize) -> ClientResult<Value> {
        let url = format!("{}/paper/search", self.graph_api_url);

        let params = [
            ("query", text.to_string()),
            ("limit", limit.to_string()),
            ("fields", fields::SEARCH.join(",")),
        ];

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let response = self.handle_response(response).await?;
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() { ClientError::Timeout(self.timeout) } else { ClientError::Http(e) }
        })?;

        Ok(parse_body(&body))
    }
}

impl std::fmt::Debug for SemanticScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticScholarClient")
            .field("has_api_key", &self.has_api_key())
            .field("graph_api_url", &self.graph_api_url)
            .finish()
    }
}

/// Decode a response body; text that is not JSON comes back as a JSON string.
fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.trim().to_string()))
}
