//! Order HTTP handlers

use super::model::{NewOrder, Order, OrderUpdate};
use super::service::{ensure_table, persist_order};
use crate::core::entity::{changes, now};
use crate::core::error::ServiceResult;
use crate::core::validation::Validated;
use crate::server::AppState;
use crate::storage::Filter;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

pub async fn list_orders(State(state): State<AppState>) -> ServiceResult<Json<Vec<Order>>> {
    let orders = state.repository.list::<Order>(&Filter::all()).await?;
    Ok(Json(orders))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> ServiceResult<Json<Order>> {
    state.repository.get::<Order>(&order_id).await.map(Json)
}

pub async fn create_order(
    State(state): State<AppState>,
    Validated(payload): Validated<NewOrder>,
) -> ServiceResult<(StatusCode, Json<Order>)> {
    if let Some(table_id) = &payload.table_id {
        ensure_table(&state.repository, table_id).await?;
    }

    let order = Order::new(payload.table_id, payload.order_date.unwrap_or_else(now));
    persist_order(&state.repository, &order).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn update_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Validated(payload): Validated<OrderUpdate>,
) -> ServiceResult<Json<Order>> {
    if let Some(table_id) = &payload.table_id {
        ensure_table(&state.repository, table_id).await?;
    }

    let set = changes(&payload)?;
    state.repository.update::<Order>(&order_id, set).await.map(Json)
}
