//! Integration tests for the stub services.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use stub_backend::StubState;
use tower::ServiceExt;

fn setup(delay: Duration) -> (Router, StubState) {
    let state = StubState::new(delay);
    let app = stub_backend::create_app(state.clone());
    (app, state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn restaurant_body() -> Value {
    json!({
        "name": "My Restaurant",
        "menu": [{"id": "1", "name": "Chicken Vindaloo", "price": "12.34"}]
    })
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup(Duration::ZERO);
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_account_visible_only_after_propagation() {
    let (app, _) = setup(Duration::from_millis(100));

    let (status, body) = send(
        &app,
        "POST",
        "/consumers",
        Some(json!({"name": {"first": "John", "last": "Doe"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["consumerId"], 1);

    let (status, _) = send(&app, "GET", "/accounts/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    tokio::time::sleep(Duration::from_millis(150)).await;

    let (status, _) = send(&app, "GET", "/accounts/1", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_order_lifecycle_with_immediate_consistency() {
    let (app, _) = setup(Duration::ZERO);

    let (status, body) = send(&app, "POST", "/restaurants", Some(restaurant_body())).await;
    assert_eq!(status, StatusCode::OK);
    let restaurant_id = body["id"].as_i64().unwrap();

    let (status, _) = send(&app, "GET", &format!("/restaurants/{restaurant_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "consumerId": 1,
            "restaurantId": restaurant_id,
            "lineItems": [{"menuItemId": "1", "quantity": 5}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let order_id = body["orderId"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", &format!("/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "APPROVED");
    assert_eq!(body["orderTotal"], "61.70");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/orders/{order_id}/revise"),
        Some(json!({"revisedLineItemQuantities": {"1": 10}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", &format!("/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "APPROVED");
    assert_eq!(body["orderTotal"], "123.40");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/orders/{order_id}/cancel"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", &format!("/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "CANCELLED");
}

#[tokio::test]
async fn test_fresh_order_reads_pending_until_authorized() {
    let (app, _) = setup(Duration::from_millis(100));

    let (_, body) = send(&app, "POST", "/restaurants", Some(restaurant_body())).await;
    let restaurant_id = body["id"].as_i64().unwrap();

    // The restaurant record itself also propagates, but the order service
    // prices against its own copy, so ordering right away is allowed.
    let (status, body) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "consumerId": 1,
            "restaurantId": restaurant_id,
            "lineItems": [{"menuItemId": "1", "quantity": 5}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let order_id = body["orderId"].as_i64().unwrap();

    let (_, body) = send(&app, "GET", &format!("/orders/{order_id}"), None).await;
    assert_eq!(body["state"], "PENDING");

    tokio::time::sleep(Duration::from_millis(150)).await;

    let (_, body) = send(&app, "GET", &format!("/orders/{order_id}"), None).await;
    assert_eq!(body["state"], "APPROVED");
}

#[tokio::test]
async fn test_injected_order_creation_failure_returns_500() {
    let (app, state) = setup(Duration::ZERO);

    let (_, body) = send(&app, "POST", "/restaurants", Some(restaurant_body())).await;
    let restaurant_id = body["id"].as_i64().unwrap();

    state.set_fail_on_create_order(true);

    let (status, body) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "consumerId": 1,
            "restaurantId": restaurant_id,
            "lineItems": [{"menuItemId": "1", "quantity": 5}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().is_some());
    assert_eq!(state.order_count(), 0);
}

#[tokio::test]
async fn test_unknown_order_returns_404() {
    let (app, _) = setup(Duration::ZERO);
    let (status, _) = send(&app, "GET", "/orders/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
