//! Queue operation HTTP handlers.

use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::error::QueueError;

use super::types::{AppState, ConsumeQuery, PublishRequest};

/// Publish a message to a queue, creating the queue on first use.
pub async fn publish(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<PublishRequest>,
) -> Response {
    if req.message.is_empty() {
        return (StatusCode::BAD_REQUEST, "message must not be empty").into_response();
    }

    match state.manager.enqueue(&name, req.message) {
        Ok(_) => {
            tracing::debug!(queue = %name, "message published");
            StatusCode::OK.into_response()
        }
        Err(e) => {
            tracing::warn!(queue = %name, error = %e, "publish rejected");
            e.into_response()
        }
    }
}

/// Consume the oldest message from a queue, long-polling up to the timeout
/// given in the query string (seconds). Absent or unparsable timeouts fall
/// back to the process-wide default.
pub async fn consume(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<ConsumeQuery>,
) -> Response {
    let timeout = query
        .timeout
        .as_deref()
        .and_then(|t| t.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(state.default_timeout);

    match state.manager.dequeue(&name, timeout).await {
        Ok(message) => (StatusCode::OK, message.body).into_response(),
        Err(e @ QueueError::WaitTimeout) => {
            tracing::debug!(queue = %name, timeout_secs = timeout.as_secs(), "long-poll expired");
            e.into_response()
        }
        Err(e) => {
            tracing::debug!(queue = %name, error = %e, "consume returned nothing");
            e.into_response()
        }
    }
}

/// Liveness probe.
pub async fn health() -> &'static str {
    "OK"
}

/// Stats snapshot across all queues.
pub async fn stats(State(state): State<AppState>) -> Response {
    Json(state.manager.stats_summary()).into_response()
}
