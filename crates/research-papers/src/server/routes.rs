//! Router and handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{PipelineError, PipelineResult};
use crate::models::{PapersResponse, Query};
use crate::pipeline::Pipeline;

/// Header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared state for HTTP handlers.
#[derive(Debug)]
pub struct AppState {
    pub pipeline: Pipeline,
}

/// Create the HTTP router.
pub fn create_router(pipeline: Pipeline) -> Router {
    let state = Arc::new(AppState { pipeline });

    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/fetch_papers", post(fetch_papers))
        .route("/fetch_papers/", post(fetch_papers))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "research-papers",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Handle POST /fetch_papers.
async fn fetch_papers(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Query>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("fetch_papers", %request_id);

    let mut response = async {
        match payload {
            Err(rejection) => {
                tracing::warn!(error = %rejection, "Rejected malformed request body");
                detail_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
            }
            Ok(Json(query)) => match run_pipeline(&state, query).await {
                Ok(papers) => Json(papers).into_response(),
                Err(err) => err.into_response(),
            },
        }
    }
    .instrument(span)
    .await;

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Run the pipeline on its own task; a panic surfaces as [`PipelineError::Internal`].
async fn run_pipeline(state: &Arc<AppState>, query: Query) -> PipelineResult<PapersResponse> {
    let pipeline = state.pipeline.clone();
    tokio::spawn(async move { pipeline.run(&query).await }.in_current_span())
        .await
        .unwrap_or_else(|err| Err(PipelineError::internal(err.to_string())))
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::info!(error = %self, "Request rejected");
        }

        detail_response(status, self.to_user_message())
    }
}

/// Error body in `{"detail": ...}` form.
fn detail_response(status: StatusCode, detail: String) -> Response {
    (status, Json(serde_json::json!({ "detail": detail }))).into_response()
}
