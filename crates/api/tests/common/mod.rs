//! Shared helpers for API integration tests.
//!
//! `build_test_app` constructs the real router (same middleware stack as
//! production) over a `#[sqlx::test]`-provided pool, with fixed access
//! keys and a small in-memory routing table.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use cbox_api::auth::keys::AccessKeys;
use cbox_api::config::ServerConfig;
use cbox_api::notifications::email::ComplaintNotifier;
use cbox_api::router::build_app_router;
use cbox_api::state::AppState;
use cbox_core::classify::KeywordClassifier;
use cbox_core::routing::RoutingTable;

/// Admin (read-only) key used in tests.
pub const TEST_ADMIN_KEY: &str = "test_admin_key";
/// Modify (read-write) key used in tests.
pub const TEST_MODIFY_KEY: &str = "test_modify_key";

/// Build a test `ServerConfig` with safe defaults and fixed keys.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        keys: AccessKeys::new(TEST_ADMIN_KEY.to_string(), TEST_MODIFY_KEY.to_string()),
        routing_config_path: "/nonexistent/routing.json".into(),
    }
}

/// Routing table used by tests; lookups not covered here fall back to
/// the global defaults.
pub fn test_routing_table() -> RoutingTable {
    serde_json::from_value(serde_json::json!({
        "Billing": {
            "Refunds": { "level1": "refunds@example.com", "level2": "billing.lead@example.com" },
            "default": { "level1": "billing@example.com", "level2": "billing.lead@example.com" }
        },
        "Technical": {
            "default": { "level1": "it.support@example.com", "level2": "it.manager@example.com" }
        }
    }))
    .expect("test routing table should parse")
}

/// Build the full application router over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        routing: Arc::new(test_routing_table()),
        classifier: Arc::new(KeywordClassifier::new()),
        notifier: Arc::new(ComplaintNotifier::new(None, None)),
    };
    build_app_router(state, &config)
}

/// Send a GET request and return the raw response.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// Send a POST request with a JSON body and return the raw response.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Submit a complaint through the API and return its id.
pub async fn submit_complaint(app: Router, text: &str) -> String {
    let body = serde_json::json!({
        "complaint_text": text,
        "category": "Billing",
        "subcategory": "Refunds",
        "urgency": "Medium",
        "assigned_to": "refunds@example.com",
    });
    let response = post_json(app, "/submit", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    json["complaint_id"]
        .as_str()
        .expect("submit response must carry complaint_id")
        .to_string()
}
