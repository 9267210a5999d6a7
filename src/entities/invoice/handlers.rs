//! Invoice HTTP handlers

use super::model::{DEFAULT_PAYMENT_STATUS, Invoice, InvoiceUpdate, NewInvoice};
use super::view::{InvoiceView, build_invoice_view};
use crate::core::entity::{Document, changes, now};
use crate::core::error::{ServiceError, ServiceResult};
use crate::core::validation::Validated;
use crate::entities::order::Order;
use crate::server::AppState;
use crate::storage::Filter;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Duration;

pub async fn list_invoices(State(state): State<AppState>) -> ServiceResult<Json<Vec<Invoice>>> {
    let invoices = state.repository.list::<Invoice>(&Filter::all()).await?;
    Ok(Json(invoices))
}

pub async fn get_invoice_view(
    State(state): State<AppState>,
    Path(invoice_id): Path<String>,
) -> ServiceResult<Json<InvoiceView>> {
    let invoice = state.repository.get::<Invoice>(&invoice_id).await?;
    build_invoice_view(&state.repository, &invoice).await.map(Json)
}

pub async fn create_invoice(
    State(state): State<AppState>,
    Validated(payload): Validated<NewInvoice>,
) -> ServiceResult<(StatusCode, Json<Invoice>)> {
    if !state.repository.exists::<Order>(&payload.order_id).await? {
        return Err(ServiceError::not_found(Order::entity_type(), &payload.order_id));
    }

    let status = payload
        .payment_status
        .unwrap_or_else(|| DEFAULT_PAYMENT_STATUS.to_string());
    let invoice = Invoice::new(
        payload.order_id,
        payload.payment_method,
        Some(status),
        now() + Duration::days(1),
    );
    state.repository.insert(&invoice).await?;

    tracing::info!(invoice_id = %invoice.key(), order_id = %invoice.order_id, "invoice created");
    Ok((StatusCode::CREATED, Json(invoice)))
}

pub async fn update_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<String>,
    Validated(payload): Validated<InvoiceUpdate>,
) -> ServiceResult<Json<Invoice>> {
    let set = changes(&payload)?;
    state
        .repository
        .update::<Invoice>(&invoice_id, set)
        .await
        .map(Json)
}
