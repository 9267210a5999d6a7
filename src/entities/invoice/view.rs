//! Invoice view builder
//!
//! Flattens an invoice together with the first group the order-item
//! pipeline produces for its order.

use super::model::Invoice;
use crate::core::error::ServiceResult;
use crate::entities::order_item::{OrderGroup, OrderRow, items_by_order};
use crate::storage::Repository;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rendered in place of a missing payment method
pub const UNSET_PAYMENT_METHOD: &str = "null";

/// Client-facing invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceView {
    pub invoice_id: String,
    pub payment_method: String,
    pub order_id: String,
    /// Passed through as stored; never defaulted here
    pub payment_status: Option<String>,
    pub payment_due: f64,
    pub table_number: Option<i64>,
    pub payment_due_date: DateTime<Utc>,
    pub order_details: Vec<OrderRow>,
}

/// Build the view for a stored invoice
///
/// Only the first group of the pipeline result is used. An order with no
/// items renders with a zero total, no table and no details.
pub async fn build_invoice_view(
    repository: &Repository,
    invoice: &Invoice,
) -> ServiceResult<InvoiceView> {
    let groups = items_by_order(repository, &invoice.order_id).await?;
    if groups.len() > 1 {
        tracing::debug!(
            invoice_id = %invoice.invoice_id,
            groups = groups.len(),
            "order spans several groups; using the first"
        );
    }
    Ok(from_group(invoice, groups.into_iter().next()))
}

/// Combine an invoice with an optional pipeline group
pub fn from_group(invoice: &Invoice, group: Option<OrderGroup>) -> InvoiceView {
    let (payment_due, table_number, order_details) = match group {
        Some(group) => (group.payment_due, group.table_number, group.order_items),
        None => (0.0, None, Vec::new()),
    };

    InvoiceView {
        invoice_id: invoice.invoice_id.clone(),
        payment_method: invoice
            .payment_method
            .clone()
            .unwrap_or_else(|| UNSET_PAYMENT_METHOD.to_string()),
        order_id: invoice.order_id.clone(),
        payment_status: invoice.payment_status.clone(),
        payment_due,
        table_number,
        payment_due_date: invoice.payment_due_date,
        order_details,
    }
}
