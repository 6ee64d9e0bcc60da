//! Common test utilities for Mesto integration tests
//!
//! This file contains the test application setup and helpers for sending
//! requests and creating users and cards through the API.
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use mesto::{
    create_app,
    db::{init_pool, DbPool},
    run_migrations,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Creates a test application with an in-memory SQLite database
///
/// Every app gets its own shared-cache database, so tests are isolated
/// from each other and need no cleanup.
pub fn create_test_app() -> Router {
    create_test_app_with_fallback_user(None)
}

/// Creates a test application whose requests default to `acting_user_id`
/// when they carry no `x-user-id` header
pub fn create_test_app_with_fallback_user(acting_user_id: Option<String>) -> Router {
    create_test_app_with_pool(acting_user_id).0
}

/// Creates a test application and also returns its pool, for tests that
/// need to reach behind the API
pub fn create_test_app_with_pool(acting_user_id: Option<String>) -> (Router, Arc<DbPool>) {
    let database_url = format!("file:it_{}?mode=memory&cache=shared", uuid::Uuid::new_v4());
    let pool = Arc::new(init_pool(&database_url).unwrap());

    let conn = &mut pool.get().unwrap();
    run_migrations(conn).unwrap();

    (create_app(pool.clone(), acting_user_id), pool)
}

/// Sends a request and returns the status with the parsed JSON body
///
/// ### Arguments
///
/// * `app` - The test application
/// * `method` - HTTP method
/// * `uri` - Request path
/// * `user_id` - Value for the `x-user-id` header, if any
/// * `body` - JSON body, if any
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user_id: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri).method(method);
    if let Some(user_id) = user_id {
        builder = builder.header("x-user-id", user_id);
    }

    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(app, request).await
}

/// Sends a prepared request and returns the status with the parsed JSON body
pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

/// Creates a user via the API and returns its JSON representation
pub async fn create_user(app: &Router, name: &str, about: &str) -> Value {
    let (status, user) = send(
        app,
        "POST",
        "/users",
        None,
        Some(json!({ "name": name, "about": about })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    user
}

/// Creates a card owned by `owner` via the API and returns its JSON representation
pub async fn create_card(app: &Router, owner: &str, name: &str, link: &str) -> Value {
    let (status, card) = send(
        app,
        "POST",
        "/cards",
        Some(owner),
        Some(json!({ "name": name, "link": link })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    card
}

/// Extracts the `_id` field of a user or card
pub fn id_of(value: &Value) -> String {
    value["_id"].as_str().unwrap().to_string()
}
