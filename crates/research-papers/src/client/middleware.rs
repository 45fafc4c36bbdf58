//! Middleware for the outbound HTTP clients.

use std::time::Instant;

use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};

/// Logs method, path, status, and latency of every outbound request.
///
/// Query strings are left out of the log line; they carry user queries.
#[derive(Debug, Clone, Copy)]
pub struct RequestLogging {
    provider: &'static str,
}

impl RequestLogging {
    /// Create a logger tagged with the provider name.
    #[must_use]
    pub const fn new(provider: &'static str) -> Self {
        Self { provider }
    }
}

#[async_trait::async_trait]
impl Middleware for RequestLogging {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let method = req.method().clone();
        let path = req.url().path().to_string();
        let started = Instant::now();

        let result = next.run(req, extensions).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => tracing::debug!(
                provider = self.provider,
                %method,
                path = %path,
                status = response.status().as_u16(),
                elapsed_ms,
                "Outbound request completed"
            ),
            Err(err) => tracing::warn!(
                provider = self.provider,
                %method,
                path = %path,
                elapsed_ms,
                error = %err,
                "Outbound request failed"
            ),
        }

        result
    }
}
