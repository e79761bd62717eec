/// API integration tests
/// Drive the real router through complete HTTP request/response cycles.
///
/// These run without a live store: the pool connects lazily, so routing,
/// validation, health, and fault mapping are all observable while the
/// readiness probe and storage paths see an unreachable database.
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use roster_server::{api, state::AppState};
use roster_storage::PoolSettings;
use std::time::Duration;
use tower::util::ServiceExt;

/// Router wired exactly like production, pointed at a port nothing
/// listens on. The short acquire timeout keeps the failing-store tests
/// fast.
fn create_test_app() -> Router {
    let pool = roster_storage::create_pool(&PoolSettings {
        host: "127.0.0.1".to_string(),
        port: 59999,
        database: "users_test".to_string(),
        acquire_timeout: Duration::from_millis(250),
        ..PoolSettings::default()
    });

    api::create_router(AppState::new(pool))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn health_returns_healthy_regardless_of_store() {
    let app = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["service"].is_string());
    assert!(body["version"].is_string());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn live_returns_alive_with_uptime() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health/live")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "alive");
    assert!(body["uptime"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn ready_reports_degraded_when_store_unreachable() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health/ready")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["status"], "not ready");
    assert_eq!(body["database"], "disconnected");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn list_users_maps_storage_fault_to_generic_500() {
    let app = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/users").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    // The underlying cause is logged, not echoed.
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn create_user_with_empty_body_requires_name() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request("POST", "/users", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("required"));
}

#[tokio::test]
async fn create_user_rejects_short_name_before_touching_store() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/users",
            serde_json::json!({ "name": "J", "email": "j@example.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("at least 2 characters"));
}

#[tokio::test]
async fn create_user_rejects_invalid_email() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/users",
            serde_json::json!({ "name": "John Doe", "email": "not-an-email" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("valid email"));
}

#[tokio::test]
async fn update_user_with_empty_body_is_rejected() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request("PUT", "/users/1", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("required"));
}

#[tokio::test]
async fn non_numeric_id_is_a_client_error() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/users/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_returns_structured_404() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/non-existent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Route not found");
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let app = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
}
