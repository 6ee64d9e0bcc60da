//! Integration tests for user functionality
//!
//! This file contains tests for user operations:
//! - Listing and creating users
//! - Getting users by ID, including the acting user
//! - Updating the acting user's profile and avatar

use axum::http::StatusCode;
use mesto::errors::{messages, INVALID_BODY_MESSAGE, UNAUTHORIZED_MESSAGE};
use mesto::models::{DEFAULT_USER_ABOUT, DEFAULT_USER_AVATAR, DEFAULT_USER_NAME};
use serde_json::json;

mod common;
use common::*;

const UNKNOWN_ID: &str = "7b1e2c4a-9f3d-4e5b-8a6c-0d1f2e3a4b5c";

#[tokio::test]
async fn test_list_users_empty() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/users", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_user_with_defaults() {
    let app = create_test_app();

    let (status, user) = send(&app, "POST", "/users", None, Some(json!({}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(user["_id"].is_string());
    assert_eq!(user["name"], DEFAULT_USER_NAME);
    assert_eq!(user["about"], DEFAULT_USER_ABOUT);
    assert_eq!(user["avatar"], DEFAULT_USER_AVATAR);
}

#[tokio::test]
async fn test_create_user_then_list() {
    let app = create_test_app();
    let ada = create_user(&app, "Ada", "Mathematician").await;
    let alan = create_user(&app, "Alan", "Logician").await;

    let (status, body) = send(&app, "GET", "/users", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.contains(&ada));
    assert!(users.contains(&alan));
}

#[tokio::test]
async fn test_create_user_invalid_fields() {
    let app = create_test_app();

    for payload in [
        json!({ "name": "A" }),
        json!({ "about": "x".repeat(31) }),
        json!({ "avatar": "not-a-url" }),
    ] {
        let (status, body) = send(&app, "POST", "/users", None, Some(payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], messages::CREATE_USER.bad_request);
    }

    let (_, body) = send(&app, "GET", "/users", None, None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_user_malformed_json() {
    let app = create_test_app();
    let request = axum::http::Request::builder()
        .uri("/users")
        .method("POST")
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from("{\"name\": "))
        .unwrap();

    let (status, body) = send_request(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], INVALID_BODY_MESSAGE);
}

#[tokio::test]
async fn test_get_user() {
    let app = create_test_app();
    let user = create_user(&app, "Ada", "Mathematician").await;

    let (status, body) = send(&app, "GET", &format!("/users/{}", id_of(&user)), None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, user);
}

#[tokio::test]
async fn test_get_user_malformed_id() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/users/not-an-id", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], messages::GET_USER.bad_request);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", &format!("/users/{}", UNKNOWN_ID), None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], messages::GET_USER.not_found);
}

#[tokio::test]
async fn test_get_current_user() {
    let app = create_test_app();
    let user = create_user(&app, "Ada", "Mathematician").await;

    let (status, body) = send(&app, "GET", "/users/me", Some(&id_of(&user)), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, user);
}

#[tokio::test]
async fn test_get_current_user_requires_identity() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/users/me", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], UNAUTHORIZED_MESSAGE);
}

#[tokio::test]
async fn test_fallback_identity_is_used_without_header() {
    let app = create_test_app_with_fallback_user(Some(UNKNOWN_ID.to_string()));

    // The fallback identity has no user record yet
    let (status, _) = send(&app, "GET", "/users/me", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let card = create_card(&app, UNKNOWN_ID, "Байкал", "https://example.com/baikal.jpg").await;
    assert_eq!(card["owner"], UNKNOWN_ID);

    let (status, card) = send(
        &app,
        "POST",
        "/cards",
        None,
        Some(json!({ "name": "Эльбрус", "link": "https://example.com/elbrus.jpg" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(card["owner"], UNKNOWN_ID);
}

#[tokio::test]
async fn test_update_profile_partial() {
    let app = create_test_app();
    let user = create_user(&app, "Ada", "Mathematician").await;
    let user_id = id_of(&user);

    let (status, body) = send(&app, "PATCH", "/users/me", Some(&user_id), Some(json!({ "name": "Countess" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_id"], user_id.as_str());
    assert_eq!(body["name"], "Countess");
    assert_eq!(body["about"], "Mathematician");
    assert_eq!(body["avatar"], user["avatar"]);

    let (_, stored) = send(&app, "GET", &format!("/users/{}", user_id), None, None).await;
    assert_eq!(stored, body);
}

#[tokio::test]
async fn test_update_profile_empty_body_returns_current_record() {
    let app = create_test_app();
    let user = create_user(&app, "Ada", "Mathematician").await;

    let (status, body) = send(&app, "PATCH", "/users/me", Some(&id_of(&user)), Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, user);
}

#[tokio::test]
async fn test_update_profile_invalid() {
    let app = create_test_app();
    let user = create_user(&app, "Ada", "Mathematician").await;

    let (status, body) = send(&app, "PATCH", "/users/me", Some(&id_of(&user)), Some(json!({ "about": "x" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], messages::UPDATE_PROFILE.bad_request);

    let (_, stored) = send(&app, "GET", &format!("/users/{}", id_of(&user)), None, None).await;
    assert_eq!(stored, user);
}

#[tokio::test]
async fn test_update_profile_missing_user() {
    let app = create_test_app();

    let (status, body) = send(&app, "PATCH", "/users/me", Some(UNKNOWN_ID), Some(json!({ "name": "Ghost" }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], messages::UPDATE_PROFILE.not_found);
}

#[tokio::test]
async fn test_update_profile_malformed_identity() {
    let app = create_test_app();

    let (status, body) = send(&app, "PATCH", "/users/me", Some("abc"), Some(json!({ "name": "Ghost" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], messages::UPDATE_PROFILE.bad_request);
}

#[tokio::test]
async fn test_update_avatar() {
    let app = create_test_app();
    let user = create_user(&app, "Ada", "Mathematician").await;

    let (status, body) = send(
        &app,
        "PATCH",
        "/users/me/avatar",
        Some(&id_of(&user)),
        Some(json!({ "avatar": "https://example.com/ada.png" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["avatar"], "https://example.com/ada.png");
    assert_eq!(body["name"], "Ada");
}

#[tokio::test]
async fn test_update_avatar_invalid() {
    let app = create_test_app();
    let user = create_user(&app, "Ada", "Mathematician").await;

    let (status, body) = send(
        &app,
        "PATCH",
        "/users/me/avatar",
        Some(&id_of(&user)),
        Some(json!({ "avatar": "ada.png" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], messages::UPDATE_AVATAR.bad_request);
}
