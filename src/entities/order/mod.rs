//! Order entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod service;

pub use descriptor::OrderDescriptor;
pub use model::Order;
pub use service::create_order;
