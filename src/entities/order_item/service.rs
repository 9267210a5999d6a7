//! Order-item batch creation
//!
//! Checks run before anything is written: every line is validated, then the
//! table (when one is given) must exist. Only then is the parent order
//! created and the items inserted in one batch.
//!
//! There is no rollback. If the item insert fails after the order was
//! created, the order stays behind without items.

use super::model::{BatchInsertResult, OrderItem, OrderItemBatch, OrderItemLine};
use crate::core::error::{FieldValidationError, ServiceError, ServiceResult, ValidationError};
use crate::core::money::round_currency;
use crate::core::validation::validate_payload;
use crate::entities::order::service::{create_order, ensure_table};
use crate::storage::Repository;

/// Validate, then create the order and its items
pub async fn create_order_items(
    repository: &Repository,
    batch: OrderItemBatch,
) -> ServiceResult<BatchInsertResult> {
    let lines = validate_lines(batch.order_items)?;

    if let Some(table_id) = &batch.table_id {
        ensure_table(repository, table_id).await?;
    }

    let order_id = create_order(repository, batch.table_id).await?;

    let items: Vec<OrderItem> = lines
        .into_iter()
        .map(|line| {
            OrderItem::new(
                order_id.clone(),
                line.food_id,
                line.quantity,
                round_currency(line.unit_price),
            )
        })
        .collect();

    let inserted_count = repository.insert_many(&items).await.inspect_err(|e| {
        tracing::error!(
            order_id = %order_id,
            error = %e,
            "order items were not inserted; order left without items"
        );
    })?;

    tracing::info!(order_id = %order_id, inserted_count, "order items created");

    Ok(BatchInsertResult {
        order_id,
        inserted_count,
        inserted_ids: items.into_iter().map(|i| i.order_item_id).collect(),
    })
}

/// Validate every line, reporting each failure as `order_items[i].field`
pub fn validate_lines(raw: Vec<serde_json::Value>) -> ServiceResult<Vec<OrderItemLine>> {
    if raw.is_empty() {
        return Err(ServiceError::invalid_field(
            "order_items",
            "must contain at least one entry",
        ));
    }

    let mut lines = Vec::with_capacity(raw.len());
    let mut errors = Vec::new();

    for (index, value) in raw.into_iter().enumerate() {
        match validate_payload::<OrderItemLine>("create", value) {
            Ok(line) => lines.push(line),
            Err(ServiceError::Validation(ValidationError::FieldErrors(field_errors))) => {
                errors.extend(field_errors.into_iter().map(|e| FieldValidationError {
                    field: format!("order_items[{}].{}", index, e.field),
                    message: e.message,
                }));
            }
            Err(other) => {
                errors.push(FieldValidationError {
                    field: format!("order_items[{}]", index),
                    message: other.to_string(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(lines)
    } else {
        Err(ValidationError::FieldErrors(errors).into())
    }
}
