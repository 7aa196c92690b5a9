mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{send_json, test_app, MemoryStore};
use lessonbook_core::OrderSpaces;
use serde_json::{json, Value};
use tower::ServiceExt;

fn jane_doe() -> Value {
    json!({
        "name": "Jane Doe",
        "phone": "555-1234",
        "lessonIDs": ["60f1a2b3c4d5e6f7a8b9c0d1", "61a1b2c3d4e5f6a7b8c9d0e1"],
        "spaces": 2,
    })
}

#[tokio::test]
async fn test_create_order() {
    let store = MemoryStore::connected();
    let dir = tempfile::tempdir().unwrap();

    let (status, body) =
        send_json(test_app(store.clone(), dir.path()), Method::POST, "/orders", Some(jane_doe())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Order created successfully");
    assert_eq!(body["order"]["spaces"], 2);
    assert_eq!(body["order"]["name"], "Jane Doe");
    assert_eq!(body["order"]["lessonIDs"].as_array().unwrap().len(), 2);
    assert!(body["order"]["createdAt"].is_string());

    let orders = store.orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(body["orderId"], orders[0].0.to_hex());
    assert_eq!(orders[0].1.spaces, OrderSpaces::Total(2));
}

#[tokio::test]
async fn test_create_order_with_per_lesson_spaces() {
    let store = MemoryStore::connected();
    let dir = tempfile::tempdir().unwrap();
    let mut order = jane_doe();
    order["spaces"] = json!([1, 2]);

    let (status, body) =
        send_json(test_app(store, dir.path()), Method::POST, "/orders", Some(order)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["order"]["spaces"], json!([1, 2]));
}

#[tokio::test]
async fn test_create_order_with_whole_float_spaces() {
    let store = MemoryStore::connected();
    let dir = tempfile::tempdir().unwrap();
    let mut order = jane_doe();
    order["spaces"] = json!(2.0);

    let (status, body) =
        send_json(test_app(store.clone(), dir.path()), Method::POST, "/orders", Some(order)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["order"]["spaces"], 2);
    assert_eq!(store.orders()[0].1.spaces, OrderSpaces::Total(2));
}

#[tokio::test]
async fn test_fractional_spaces_rejected() {
    let store = MemoryStore::connected();
    let dir = tempfile::tempdir().unwrap();
    let mut order = jane_doe();
    order["spaces"] = json!(2.5);

    let (status, body) =
        send_json(test_app(store.clone(), dir.path()), Method::POST, "/orders", Some(order)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");
    assert!(store.orders().is_empty());
}

#[tokio::test]
async fn test_missing_fields_rejected_and_nothing_inserted() {
    let store = MemoryStore::connected();
    let dir = tempfile::tempdir().unwrap();

    let cases = [
        ("name", json!("")),
        ("phone", json!("")),
        ("lessonIDs", json!([])),
        ("spaces", json!(0)),
        ("phone", Value::Null),
    ];
    for (field, value) in cases {
        let mut order = jane_doe();
        order[field] = value;
        let (status, body) =
            send_json(test_app(store.clone(), dir.path()), Method::POST, "/orders", Some(order)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "field {}", field);
        assert_eq!(body["error"], "Missing required fields");
    }

    for field in ["name", "phone", "lessonIDs", "spaces"] {
        let mut order = jane_doe();
        order.as_object_mut().unwrap().remove(field);
        let (status, _) =
            send_json(test_app(store.clone(), dir.path()), Method::POST, "/orders", Some(order)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "field {}", field);
    }

    assert!(store.orders().is_empty());
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let store = MemoryStore::connected();
    let dir = tempfile::tempdir().unwrap();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/orders")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = test_app(store.clone(), dir.path()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Invalid request body");
    assert!(store.orders().is_empty());
}

#[tokio::test]
async fn test_create_order_store_failure_is_500() {
    let store = MemoryStore::connected();
    store.fail_with_store_errors();
    let dir = tempfile::tempdir().unwrap();

    let (status, body) =
        send_json(test_app(store, dir.path()), Method::POST, "/orders", Some(jane_doe())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
}
