//! Order-item batch creation and the per-order joined view

mod api_harness;

use api_harness::Api;
use axum::http::StatusCode;
use restaurant::entities::food::Food;
use restaurant::entities::order::Order;
use restaurant::entities::order_item::OrderItem;
use restaurant::prelude::*;
use serde_json::{Value, json};

#[tokio::test]
async fn test_batch_creates_order_and_items() {
    let api = Api::spawn().await;
    let menu = api.menu().await;
    let soup = api.food(&menu, "soup", 10.0).await;
    let bread = api.food(&menu, "bread", 5.5).await;
    let table = api.table(7).await;

    let created = api
        .create(
            "/orderItems",
            json!({
                "table_id": table,
                "order_items": [
                    {"food_id": soup, "quantity": 1, "unit_price": 10.0},
                    {"food_id": bread, "quantity": 2, "unit_price": 5.499},
                    {"food_id": soup, "quantity": 1, "unit_price": 10.0}
                ]
            }),
        )
        .await;

    assert_eq!(created["inserted_count"], 3);
    assert_eq!(created["inserted_ids"].as_array().unwrap().len(), 3);
    let order_id = created["order_id"].as_str().unwrap();

    let order: Value = api.get(&format!("/orders/{}", order_id)).await.json();
    assert_eq!(order["table_id"], table.as_str());

    let items = api
        .repository()
        .list::<OrderItem>(&Filter::by("order_id", order_id))
        .await
        .unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[1].unit_price, 5.5);
}

#[tokio::test]
async fn test_items_by_order_groups_and_totals() {
    let api = Api::spawn().await;
    let menu = api.menu().await;
    let soup = api.food(&menu, "soup", 10.0).await;
    let bread = api.food(&menu, "bread", 5.5).await;
    let table = api.table(7).await;

    let created = api
        .create(
            "/orderItems",
            json!({
                "table_id": table,
                "order_items": [
                    {"food_id": soup, "quantity": 1, "unit_price": 10.0},
                    {"food_id": bread, "quantity": 2, "unit_price": 5.5},
                    {"food_id": soup, "quantity": 1, "unit_price": 10.0}
                ]
            }),
        )
        .await;
    let order_id = created["order_id"].as_str().unwrap();

    let response = api.get(&format!("/orderItems-order/{}", order_id)).await;
    response.assert_status_ok();
    let groups: Value = response.json();
    let groups = groups.as_array().unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["payment_due"], 25.5);
    assert_eq!(groups[0]["total_count"], 3);
    assert_eq!(groups[0]["table_number"], 7);

    let rows = groups[0]["order_items"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["food_name"], "soup");
    assert_eq!(rows[0]["food_image"], "soup.png");
    assert_eq!(rows[0]["amount"], 10.0);
    assert_eq!(rows[1]["food_name"], "bread");
    assert_eq!(rows[1]["quantity"], 2);
    assert_eq!(rows[2]["table_id"], table.as_str());
    assert_eq!(rows[2]["order_id"], order_id);
}

#[tokio::test]
async fn test_items_by_order_is_stable_across_calls() {
    let api = Api::spawn().await;
    let menu = api.menu().await;
    let soup = api.food(&menu, "soup", 3.33).await;

    let created = api
        .create(
            "/orderItems",
            json!({"order_items": [
                {"food_id": soup, "quantity": 1, "unit_price": 3.33},
                {"food_id": soup, "quantity": 1, "unit_price": 3.33},
                {"food_id": soup, "quantity": 1, "unit_price": 3.33}
            ]}),
        )
        .await;
    let path = format!("/orderItems-order/{}", created["order_id"].as_str().unwrap());

    let first: Value = api.get(&path).await.json();
    let second: Value = api.get(&path).await.json();
    assert_eq!(first, second);
    assert_eq!(first[0]["payment_due"], 9.99);
    assert_eq!(first[0]["table_number"], Value::Null);
}

#[tokio::test]
async fn test_order_without_items_yields_empty_list() {
    let api = Api::spawn().await;
    let order = api.create("/orders", json!({})).await;

    let response = api
        .get(&format!("/orderItems-order/{}", order["order_id"].as_str().unwrap()))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));

    let unknown: Value = api.get("/orderItems-order/does-not-exist").await.json();
    assert_eq!(unknown, json!([]));
}

#[tokio::test]
async fn test_unknown_food_is_kept_with_null_fields() {
    let api = Api::spawn().await;
    let menu = api.menu().await;
    let soup = api.food(&menu, "soup", 4.0).await;

    let created = api
        .create(
            "/orderItems",
            json!({"order_items": [
                {"food_id": soup, "quantity": 1, "unit_price": 4.0},
                {"food_id": "gone", "quantity": 1, "unit_price": 7.0}
            ]}),
        )
        .await;

    let groups: Value = api
        .get(&format!("/orderItems-order/{}", created["order_id"].as_str().unwrap()))
        .await
        .json();
    assert_eq!(groups[0]["payment_due"], 4.0);
    assert_eq!(groups[0]["total_count"], 2);
    assert_eq!(groups[0]["order_items"][1]["food_name"], Value::Null);
    assert_eq!(groups[0]["order_items"][1]["amount"], Value::Null);
}

#[tokio::test]
async fn test_missing_table_writes_nothing() {
    let api = Api::spawn().await;
    let menu = api.menu().await;
    let soup = api.food(&menu, "soup", 4.0).await;

    let response = api
        .post(
            "/orderItems",
            json!({
                "table_id": "no-such-table",
                "order_items": [{"food_id": soup, "quantity": 1, "unit_price": 4.0}]
            }),
        )
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "ENTITY_NOT_FOUND");

    let repo = api.repository();
    assert_eq!(repo.count::<Order>(&Filter::all()).await.unwrap(), 0);
    assert_eq!(repo.count::<OrderItem>(&Filter::all()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_invalid_line_writes_nothing() {
    let api = Api::spawn().await;

    let response = api
        .post(
            "/orderItems",
            json!({"order_items": [
                {"food_id": "f1", "quantity": 1, "unit_price": 1.0},
                {"food_id": "f2", "quantity": -2, "unit_price": 1.0}
            ]}),
        )
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["details"]["fields"][0]["field"], "order_items[1].quantity");
    assert_eq!(api.repository().count::<Order>(&Filter::all()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_empty_batch_is_rejected() {
    let api = Api::spawn().await;
    let response = api.post("/orderItems", json!({"order_items": []})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_order_item() {
    let api = Api::spawn().await;
    let created = api
        .create(
            "/orderItems",
            json!({"order_items": [{"food_id": "f1", "quantity": 1, "unit_price": 2.0}]}),
        )
        .await;
    let item_id = created["inserted_ids"][0].as_str().unwrap();

    let response = api
        .patch(
            &format!("/orderItems/{}", item_id),
            json!({"quantity": 3, "unit_price": 2.345}),
        )
        .await;
    response.assert_status_ok();
    let item: Value = response.json();
    assert_eq!(item["quantity"], 3);
    assert_eq!(item["unit_price"], 2.35);
    assert_eq!(item["order_id"], created["order_id"]);

    let listed: Value = api.get("/orderItems").await.json();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    api.patch("/orderItems/missing", json!({"quantity": 1}))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_price_above_ceiling_is_rejected_at_the_door() {
    let api = Api::spawn().await;
    let menu = api.menu().await;

    let response = api
        .post(
            "/foods",
            json!({"name": "caviar", "price": 5.0e28, "food_image": "c.png", "menu_id": menu}),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = api
        .post(
            "/orderItems",
            json!({"order_items": [{"food_id": "f1", "quantity": 1, "unit_price": 5.0e28}]}),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unsummable_stored_prices_fail_the_view_cleanly() {
    let api = Api::spawn().await;
    let repo = api.repository();

    let caviar = Food::new(
        "caviar".to_string(),
        5.0e28,
        "c.png".to_string(),
        "m1".to_string(),
    );
    repo.insert(&caviar).await.unwrap();
    let order = Order::new(None, chrono::Utc::now());
    repo.insert(&order).await.unwrap();
    for _ in 0..2 {
        let line = OrderItem::new(order.order_id.clone(), caviar.food_id.clone(), 1, 1.0);
        repo.insert(&line).await.unwrap();
    }

    let response = api.get(&format!("/orderItems-order/{}", order.order_id)).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], "INTERNAL_ERROR");
}
