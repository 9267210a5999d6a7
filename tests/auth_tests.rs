//! Signup, login and token enforcement

mod api_harness;

use api_harness::{Api, TEST_SECRET, signup};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use restaurant::core::auth::{JwtAuthProvider, JwtSettings};
use restaurant::entities::user::User;
use restaurant::prelude::*;
use serde_json::{Value, json};

#[tokio::test]
async fn test_health_is_public() {
    let api = Api::spawn().await;
    let body: Value = api.server.get("/health").await.json();
    assert_eq!(body, json!({"status": "ok", "service": "restaurant"}));
    api.server.get("/").await.assert_status_ok();
}

#[tokio::test]
async fn test_routes_require_a_token() {
    let api = Api::spawn().await;

    let response = api.server.get("/foods").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["code"], "UNAUTHORIZED");

    api.server
        .get("/foods")
        .authorization_bearer("garbage")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_header_is_accepted() {
    let api = Api::spawn().await;
    api.server
        .get("/tables")
        .add_header(
            HeaderName::from_static("token"),
            HeaderValue::from_str(&api.token).unwrap(),
        )
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_refresh_token_cannot_authorize() {
    let api = Api::spawn().await;
    let body = signup(&api.server, "other@example.com", "+15550000009").await;

    api.server
        .get("/tables")
        .authorization_bearer(body["refresh_token"].as_str().unwrap())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_from_another_secret_is_rejected() {
    let api = Api::spawn().await;
    let foreign = JwtAuthProvider::new(JwtSettings {
        secret: format!("{}-other", TEST_SECRET),
        issuer: "restaurant-tests".to_string(),
        access_token_minutes: 5,
        refresh_token_hours: 1,
    });
    let tokens = foreign
        .issue_tokens(&restaurant::core::auth::TokenSubject {
            user_id: "u1".to_string(),
            email: "x@example.com".to_string(),
            first_name: "X".to_string(),
            last_name: "Y".to_string(),
        })
        .unwrap();

    api.server
        .get("/tables")
        .authorization_bearer(tokens.token)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_stores_hash_and_tokens() {
    let api = Api::spawn().await;
    let body = signup(&api.server, "new@example.com", "+15550000010").await;

    assert!(body["user"].get("password").is_none());
    let user_id = body["user"]["user_id"].as_str().unwrap();

    let stored = api.repository().get::<User>(user_id).await.unwrap();
    assert_ne!(stored.password, "correct horse");
    assert!(stored.password.starts_with("$argon2"));
    assert_eq!(stored.token.as_deref(), body["token"].as_str());
    assert_eq!(stored.refresh_token.as_deref(), body["refresh_token"].as_str());

    let fetched: Value = api.get(&format!("/users/{}", user_id)).await.json();
    assert_eq!(fetched["email"], "new@example.com");
    assert!(fetched.get("password").is_none());
}

#[tokio::test]
async fn test_duplicate_email_or_phone_conflicts() {
    let api = Api::spawn().await;

    let payload = |email: &str, phone: &str| {
        json!({
            "first_name": "Sam",
            "last_name": "Cook",
            "email": email,
            "password": "correct horse",
            "phone": phone
        })
    };

    let response = api
        .server
        .post("/users/signup")
        .json(&payload("STAFF@example.com", "+15550000077"))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["code"], "ENTITY_ALREADY_EXISTS");

    api.server
        .post("/users/signup")
        .json(&payload("fresh@example.com", "+15550000001"))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_reissues_tokens() {
    let api = Api::spawn().await;

    let response = api
        .server
        .post("/users/login")
        .json(&json!({"email": "staff@example.com", "password": "correct horse"}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    let token = body["token"].as_str().unwrap();

    let user_id = body["user"]["user_id"].as_str().unwrap();
    let stored = api.repository().get::<User>(user_id).await.unwrap();
    assert_eq!(stored.token.as_deref(), Some(token));

    api.server
        .get("/menus")
        .authorization_bearer(token)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_login_failures() {
    let api = Api::spawn().await;

    api.server
        .post("/users/login")
        .json(&json!({"email": "ghost@example.com", "password": "whatever"}))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let response = api
        .server
        .post("/users/login")
        .json(&json!({"email": "staff@example.com", "password": "wrong horse"}))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Unauthorized: email or password is incorrect");
}
