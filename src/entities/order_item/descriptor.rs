//! Entity descriptor for OrderItem

use super::handlers::{
    create_order_item_batch, get_order_item, get_order_items_by_order, list_order_items,
    update_order_item,
};
use crate::server::{AppState, EntityDescriptor};
use axum::{Router, routing::get};

/// Descriptor for the OrderItem entity
pub struct OrderItemDescriptor;

impl EntityDescriptor for OrderItemDescriptor {
    fn entity_type(&self) -> &str {
        "order_item"
    }

    fn plural(&self) -> &str {
        "orderItems"
    }

    fn build_routes(&self) -> Router<AppState> {
        Router::new()
            .route(
                "/orderItems",
                get(list_order_items).post(create_order_item_batch),
            )
            .route(
                "/orderItems/{order_item_id}",
                get(get_order_item).patch(update_order_item),
            )
            .route(
                "/orderItems-order/{order_id}",
                get(get_order_items_by_order),
            )
    }
}
