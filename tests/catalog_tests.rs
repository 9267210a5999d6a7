//! Menus, foods, tables and orders over HTTP

mod api_harness;

use api_harness::Api;
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::{Value, json};

#[tokio::test]
async fn test_menu_dates_must_form_a_future_span() {
    let api = Api::spawn().await;
    let menu_id = api.menu().await;
    let path = format!("/menus/{}", menu_id);

    let start = Utc::now() + Duration::days(1);
    let end = start + Duration::days(7);
    let updated: Value = api
        .patch(
            &path,
            json!({"start_date": start.to_rfc3339(), "end_date": end.to_rfc3339()}),
        )
        .await
        .json();
    assert!(updated["start_date"].is_string());

    let past = Utc::now() - Duration::days(1);
    let response = api
        .patch(
            &path,
            json!({"start_date": past.to_rfc3339(), "end_date": end.to_rfc3339()}),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["message"].as_str().unwrap().contains("invalid time"));

    api.patch(&path, json!({"start_date": start.to_rfc3339()}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let renamed: Value = api.patch(&path, json!({"name": "Lunch"})).await.json();
    assert_eq!(renamed["name"], "Lunch");
    assert_eq!(renamed["category"], "main");
}

#[tokio::test]
async fn test_food_requires_existing_menu() {
    let api = Api::spawn().await;
    let response = api
        .post(
            "/foods",
            json!({"name": "Pho", "price": 9.5, "food_image": "pho.png", "menu_id": "none"}),
        )
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["details"]["entity_type"], "menu");
}

#[tokio::test]
async fn test_food_price_is_rounded_on_create_and_update() {
    let api = Api::spawn().await;
    let menu_id = api.menu().await;
    let food = api
        .create(
            "/foods",
            json!({"name": "Pho", "price": 9.555, "food_image": "pho.png", "menu_id": menu_id}),
        )
        .await;
    assert_eq!(food["price"], 9.56);

    let path = format!("/foods/{}", food["food_id"].as_str().unwrap());
    let updated: Value = api.patch(&path, json!({"price": 3.004})).await.json();
    assert_eq!(updated["price"], 3.0);
    assert_ne!(updated["updated_at"], Value::Null);

    let fetched: Value = api.get(&path).await.json();
    assert_eq!(fetched["price"], 3.0);
    assert_eq!(fetched["name"], "Pho");
}

#[tokio::test]
async fn test_table_numbers_are_unique() {
    let api = Api::spawn().await;
    let first = api.table(1).await;
    api.table(2).await;

    let response = api
        .post("/tables", json!({"number_of_guests": 2, "table_number": 1}))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    api.patch(&format!("/tables/{}", first), json!({"table_number": 2}))
        .await
        .assert_status(StatusCode::CONFLICT);

    let same: Value = api
        .patch(&format!("/tables/{}", first), json!({"table_number": 1, "number_of_guests": 6}))
        .await
        .json();
    assert_eq!(same["number_of_guests"], 6);

    let tables: Value = api.get("/tables").await.json();
    assert_eq!(tables.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_order_lifecycle() {
    let api = Api::spawn().await;
    let table = api.table(5).await;

    let order = api.create("/orders", json!({"table_id": table})).await;
    assert_eq!(order["table_id"], table.as_str());
    assert!(order["order_date"].is_string());
    let path = format!("/orders/{}", order["order_id"].as_str().unwrap());

    api.patch(&path, json!({"table_id": "missing"}))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let other = api.table(6).await;
    let moved: Value = api.patch(&path, json!({"table_id": other})).await.json();
    assert_eq!(moved["table_id"], other.as_str());

    api.post("/orders", json!({"table_id": "missing"}))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let orders: Value = api.get("/orders").await.json();
    assert_eq!(orders.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_patch_never_creates() {
    let api = Api::spawn().await;
    for path in ["/menus/x", "/foods/x", "/tables/x", "/orders/x", "/invoices/x"] {
        let response = api.patch(path, json!({})).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
    let menus: Value = api.get("/menus").await.json();
    assert_eq!(menus, json!([]));
}
