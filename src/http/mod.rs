//! HTTP API module.
//!
//! Exposes the queue engine over a small REST surface: publish and consume on
//! `/queue/{name}`, plus liveness and stats endpoints.

mod handlers;
mod types;

#[cfg(test)]
mod tests;

use axum::routing::{get, put};
use axum::Router;

pub use types::{AppState, ConsumeQuery, PublishRequest};

/// Create the HTTP router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/queue/{name}",
            put(handlers::publish).get(handlers::consume),
        )
        .route("/health", get(handlers::health))
        .route("/stats", get(handlers::stats))
        .with_state(state)
}
