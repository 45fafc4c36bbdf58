//! HTTP server exposing the paper pipeline.
//!
//! One inbound operation, `POST /fetch_papers`, plus health checks.

pub mod routes;

use std::net::SocketAddr;

use crate::pipeline::Pipeline;

/// HTTP server for the paper pipeline.
#[derive(Debug)]
pub struct HttpServer {
    pipeline: Pipeline,
}

impl HttpServer {
    /// Create a new server.
    #[must_use]
    pub const fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Bind and serve until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns error on bind or server failure.
    pub async fn run(self, addr: SocketAddr) -> anyhow::Result<()> {
        let router = routes::create_router(self.pipeline);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Received shutdown signal");
}
