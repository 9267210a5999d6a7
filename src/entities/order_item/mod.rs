//! Order-item entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod pipeline;
pub mod service;

pub use descriptor::OrderItemDescriptor;
pub use model::OrderItem;
pub use pipeline::{OrderGroup, OrderRow, items_by_order};
