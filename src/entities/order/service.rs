//! Order creation
//!
//! Parent orders are inserted under the dedicated order-insert deadline.
//! Failures are returned to the caller, which decides whether to go on
//! writing order items.

use super::model::Order;
use crate::core::entity::{Document, now};
use crate::core::error::ServiceResult;
use crate::entities::table::Table;
use crate::storage::Repository;

/// Insert a new order for `table_id` and return its key
///
/// The table reference is stored as given; callers check it exists first
/// (see [`ensure_table`]).
pub async fn create_order(repository: &Repository, table_id: Option<String>) -> ServiceResult<String> {
    let order = Order::new(table_id, now());
    persist_order(repository, &order).await?;
    Ok(order.order_id)
}

/// Insert an already built order under the order-insert deadline
pub async fn persist_order(repository: &Repository, order: &Order) -> ServiceResult<()> {
    let deadline = repository.timeouts().order_insert;

    match repository.insert_within(order, deadline).await {
        Ok(()) => {
            tracing::info!(
                order_id = %order.key(),
                table_id = ?order.table_id,
                "order created"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(order_id = %order.key(), error = %e, "order was not created");
            Err(e)
        }
    }
}

/// Fail with NotFound unless the table exists
pub async fn ensure_table(repository: &Repository, table_id: &str) -> ServiceResult<()> {
    repository.get::<Table>(table_id).await.map(|_| ())
}
