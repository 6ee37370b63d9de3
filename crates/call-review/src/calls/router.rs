use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::CallId;
use super::repository::{ArtifactStore, StoreError};
use super::service::{CallReviewError, CallReviewService};
use crate::evaluation::Transcript;
use crate::sentiment::SentimentScorer;

/// Body of `POST /api/v1/calls`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    pub call_id: String,
    pub transcript: String,
}

/// Router builder exposing HTTP endpoints for call review.
pub fn call_router<R, S>(service: Arc<CallReviewService<R, S>>) -> Router
where
    R: ArtifactStore + 'static,
    S: SentimentScorer + 'static,
{
    Router::new()
        .route("/api/v1/calls", post(review_handler::<R, S>))
        .route("/api/v1/calls/:call_id", get(stored_call_handler::<R, S>))
        .with_state(service)
}

pub(crate) async fn review_handler<R, S>(
    State(service): State<Arc<CallReviewService<R, S>>>,
    axum::Json(request): axum::Json<ReviewRequest>,
) -> Response
where
    R: ArtifactStore + 'static,
    S: SentimentScorer + 'static,
{
    let call_id = match CallId::new(request.call_id) {
        Ok(call_id) => call_id,
        Err(error) => return error_response(StatusCode::UNPROCESSABLE_ENTITY, &error),
    };

    match service.review_transcript(call_id, Transcript::new(request.transcript)) {
        Ok(review) => (StatusCode::CREATED, axum::Json(review.view())).into_response(),
        Err(error) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &error),
    }
}

pub(crate) async fn stored_call_handler<R, S>(
    State(service): State<Arc<CallReviewService<R, S>>>,
    Path(call_id): Path<String>,
) -> Response
where
    R: ArtifactStore + 'static,
    S: SentimentScorer + 'static,
{
    let call_id = match CallId::new(call_id) {
        Ok(call_id) => call_id,
        Err(error) => return error_response(StatusCode::UNPROCESSABLE_ENTITY, &error),
    };

    match service.get(&call_id) {
        Ok(stored) => (StatusCode::OK, axum::Json(stored)).into_response(),
        Err(CallReviewError::Store(StoreError::NotFound { .. })) => {
            let payload = json!({
                "call_id": call_id.as_str(),
                "error": "call has not been reviewed",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &other),
    }
}

fn error_response(status: StatusCode, error: &dyn std::error::Error) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
