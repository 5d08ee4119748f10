//! HTTP API integration tests.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use super::{create_router, AppState};
use crate::queue::QueueManager;

fn test_app(default_capacity: usize, max_queues: usize) -> Router {
    let state = AppState {
        manager: Arc::new(QueueManager::new(default_capacity, max_queues)),
        default_timeout: Duration::from_millis(100),
    };
    create_router(state)
}

fn publish_request(queue: &str, body: &str) -> Request<Body> {
    Request::put(format!("/queue/{queue}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn consume_request(queue: &str, query: &str) -> Request<Body> {
    Request::get(format!("/queue/{queue}{query}"))
        .body(Body::empty())
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app(10, 10);
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_publish_then_consume() {
    let app = test_app(10, 10);

    let response = app
        .clone()
        .oneshot(publish_request("emails", r#"{"message":"hello"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(consume_request("emails", "?timeout=0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "hello");
}

#[tokio::test]
async fn test_consume_empty_queue_returns_not_found() {
    let app = test_app(10, 10);

    let response = app
        .oneshot(consume_request("empty", "?timeout=0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_publish_empty_message_rejected() {
    let app = test_app(10, 10);

    let response = app
        .oneshot(publish_request("emails", r#"{"message":""}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_publish_to_full_queue_returns_service_unavailable() {
    let app = test_app(1, 10);

    let response = app
        .clone()
        .oneshot(publish_request("tiny", r#"{"message":"first"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(publish_request("tiny", r#"{"message":"second"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_queue_limit_returns_service_unavailable() {
    let app = test_app(10, 1);

    let response = app
        .clone()
        .oneshot(publish_request("first", r#"{"message":"m"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(publish_request("second", r#"{"message":"m"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    // The existing queue keeps working after the limit is hit.
    let response = app
        .oneshot(publish_request("first", r#"{"message":"m"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unparsable_timeout_falls_back_to_default() {
    let app = test_app(10, 10);

    let start = std::time::Instant::now();
    let response = app
        .oneshot(consume_request("empty", "?timeout=soon"))
        .await
        .unwrap();
    let elapsed = start.elapsed();

    // Default timeout in the test app is 100ms, so the long-poll waits.
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(elapsed >= Duration::from_millis(100));
}

#[tokio::test]
async fn test_long_poll_receives_later_publish() {
    let app = test_app(10, 10);

    let consumer = {
        let app = app.clone();
        tokio::spawn(async move {
            app.oneshot(consume_request("jobs", "?timeout=5"))
                .await
                .unwrap()
        })
    };

    tokio::time::sleep(Duration::from_millis(200)).await;
    let response = app
        .oneshot(publish_request("jobs", r#"{"message":"work"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = consumer.await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "work");
}

#[tokio::test]
async fn test_stats_endpoint() {
    let app = test_app(10, 10);

    let response = app
        .clone()
        .oneshot(publish_request("emails", r#"{"message":"hello"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::get("/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["total_queues"], 1);
    assert_eq!(json["queues"]["emails"]["enqueued_total"], 1);
}
