//! Order-item HTTP handlers

use super::model::{BatchInsertResult, OrderItem, OrderItemBatch, OrderItemUpdate};
use super::pipeline::{OrderGroup, items_by_order};
use super::service::create_order_items;
use crate::core::auth::AuthContext;
use crate::core::entity::changes;
use crate::core::error::ServiceResult;
use crate::core::validation::Validated;
use crate::server::AppState;
use crate::storage::Filter;
use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

pub async fn list_order_items(
    State(state): State<AppState>,
) -> ServiceResult<Json<Vec<OrderItem>>> {
    let items = state.repository.list::<OrderItem>(&Filter::all()).await?;
    Ok(Json(items))
}

pub async fn get_order_item(
    State(state): State<AppState>,
    Path(order_item_id): Path<String>,
) -> ServiceResult<Json<OrderItem>> {
    state.repository.get::<OrderItem>(&order_item_id).await.map(Json)
}

/// Joined, grouped view of one order's items
pub async fn get_order_items_by_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> ServiceResult<Json<Vec<OrderGroup>>> {
    items_by_order(&state.repository, &order_id).await.map(Json)
}

pub async fn create_order_item_batch(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthContext>,
    Validated(batch): Validated<OrderItemBatch>,
) -> ServiceResult<(StatusCode, Json<BatchInsertResult>)> {
    tracing::debug!(
        user_id = ?caller.user_id(),
        lines = batch.order_items.len(),
        "order item batch received"
    );
    let result = create_order_items(&state.repository, batch).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

pub async fn update_order_item(
    State(state): State<AppState>,
    Path(order_item_id): Path<String>,
    Validated(payload): Validated<OrderItemUpdate>,
) -> ServiceResult<Json<OrderItem>> {
    let set = changes(&payload)?;
    state
        .repository
        .update::<OrderItem>(&order_item_id, set)
        .await
        .map(Json)
}
