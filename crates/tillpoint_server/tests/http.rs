//! Route-level tests for the sync endpoints.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tillpoint_server::{AppState, AuthConfig, ServerConfig, TokenValidator};
use tower::ServiceExt;

fn app(config: ServerConfig) -> Router {
    tillpoint_server::router(AppState::new(config))
}

fn product(id: i64, sku: &str, name: &str) -> Value {
    json!({
        "id": id,
        "sku": sku,
        "name": name,
        "cost_price": 10.0,
        "sale_price": 25.0,
        "current_stock": 5,
        "min_stock": 1,
        "last_updated": "2025-03-01T09:00:00Z",
    })
}

fn post_sync(entity: &str, query: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/sync/{entity}{query}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_sync(entity: &str, query: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/sync/{entity}{query}"))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn push_then_pull() {
    let app = app(ServerConfig::default());

    let batch = json!([product(1, "SKU-1", "Beans")]);
    let response = app
        .clone()
        .oneshot(post_sync("products", "", &batch))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["synced_records"].as_array().unwrap().len(), 1);
    assert_eq!(body["conflicts"].as_array().unwrap().len(), 0);

    let response = app
        .clone()
        .oneshot(get_sync("products", "?last_sync=2025-03-01T08:00:00Z"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let updated = body["server_updated"].as_array().unwrap();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0]["name"], "Beans");
}

#[tokio::test]
async fn push_with_watermark_is_a_combined_exchange() {
    let app = app(ServerConfig::default());

    // Server learns about one product from another terminal.
    app.clone()
        .oneshot(post_sync("products", "", &json!([product(1, "SKU-1", "Beans")])))
        .await
        .unwrap();

    // Our terminal pushes a different product with a watermark.
    let response = app
        .clone()
        .oneshot(post_sync(
            "products",
            "?last_sync=2025-03-01T08:00:00Z",
            &json!([product(2, "SKU-2", "Grinder")]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["synced_records"].as_array().unwrap().len(), 1);
    // Both the other terminal's record and our accepted one are past
    // the watermark.
    assert_eq!(body["server_updated"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn conflicting_push_reports_but_succeeds() {
    let app = app(ServerConfig::default());

    app.clone()
        .oneshot(post_sync("products", "", &json!([product(1, "SKU-1", "Beans")])))
        .await
        .unwrap();

    // Same stale stamp again: ties to the server, still HTTP 200.
    let response = app
        .clone()
        .oneshot(post_sync("products", "", &json!([product(1, "SKU-1", "Rename")])))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["synced_records"].as_array().unwrap().len(), 0);
    assert_eq!(body["conflicts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_entity_is_404() {
    let app = app(ServerConfig::default());

    let response = app
        .clone()
        .oneshot(get_sync("gadgets", "?last_sync=2025-03-01T08:00:00Z"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(post_sync("gadgets", "", &json!([])))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pull_requires_watermark() {
    let app = app(ServerConfig::default());
    let response = app.clone().oneshot(get_sync("products", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_batch_is_rejected_before_engine_work() {
    let app = app(ServerConfig::default().with_max_push_batch(2));

    let batch = json!([
        product(1, "A", "One"),
        product(2, "B", "Two"),
        product(3, "C", "Three"),
    ]);
    let response = app
        .clone()
        .oneshot(post_sync("products", "", &batch))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was applied.
    let response = app
        .clone()
        .oneshot(get_sync("products", "?last_sync=2020-01-01T00:00:00Z"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["server_updated"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn unreadable_body_is_a_client_error() {
    let app = app(ServerConfig::default());
    let request = Request::builder()
        .method("POST")
        .uri("/sync/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn duplicate_sku_fails_the_whole_batch() {
    let app = app(ServerConfig::default());

    app.clone()
        .oneshot(post_sync("products", "", &json!([product(1, "TAKEN", "First")])))
        .await
        .unwrap();

    let batch = json!([product(2, "FRESH", "Second"), product(3, "TAKEN", "Dup")]);
    let response = app
        .clone()
        .oneshot(post_sync("products", "", &batch))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // The valid record rolled back with the rest: only row 1 is visible.
    let response = app
        .clone()
        .oneshot(get_sync("products", "?last_sync=2020-01-01T00:00:00Z"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["server_updated"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn auth_required_when_configured() {
    let secret = b"test-secret-key-32-bytes-long!!".to_vec();
    let app = app(ServerConfig::default().with_auth(secret.clone()));

    // No token.
    let response = app
        .clone()
        .oneshot(get_sync("products", "?last_sync=2025-03-01T08:00:00Z"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Garbage token.
    let request = Request::builder()
        .uri("/sync/products?last_sync=2025-03-01T08:00:00Z")
        .header(header::AUTHORIZATION, "Bearer bogus")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Valid token.
    let token = TokenValidator::new(AuthConfig::new(secret)).create_token(7);
    let request = Request::builder()
        .uri("/sync/products?last_sync=2025-03-01T08:00:00Z")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Health stays open for probes.
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_reports_sync_counters() {
    let app = app(ServerConfig::default());

    app.clone()
        .oneshot(post_sync("products", "", &json!([product(1, "SKU-1", "Beans")])))
        .await
        .unwrap();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let body = body_json(response).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["sync"]["pushes"], 1);
    assert_eq!(body["sync"]["records_synced"], 1);
}
