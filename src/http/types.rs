//! HTTP request and response types.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::error::QueueError;
use crate::queue::QueueManager;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<QueueManager>,
    /// Wait applied to consume requests that carry no usable timeout.
    pub default_timeout: Duration,
}

/// Body of a publish request.
#[derive(Deserialize)]
pub struct PublishRequest {
    pub message: String,
}

/// Query string of a consume request. The timeout arrives as raw text so an
/// unparsable value falls back to the process default instead of rejecting
/// the request.
#[derive(Deserialize, Default)]
pub struct ConsumeQuery {
    #[serde(default)]
    pub timeout: Option<String>,
}

impl IntoResponse for QueueError {
    fn into_response(self) -> Response {
        let status = match self {
            QueueError::QueueFull | QueueError::QueueLimitExceeded => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            QueueError::NoMessageAvailable | QueueError::WaitTimeout => StatusCode::NOT_FOUND,
        };
        (status, self.to_string()).into_response()
    }
}
