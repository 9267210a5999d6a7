//! Restaurant entities and the module that registers them
//!
//! Each entity lives in its own directory with a `model` (stored record and
//! request payloads), `handlers` and a `descriptor` that builds its routes.

pub mod macros;

pub mod food;
pub mod invoice;
pub mod menu;
pub mod order;
pub mod order_item;
pub mod table;
pub mod user;

use crate::core::module::Module;
use crate::server::entity_registry::EntityRegistry;

/// The restaurant back office: every entity the service exposes
pub struct RestaurantModule;

impl Module for RestaurantModule {
    fn name(&self) -> &str {
        "restaurant"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn entity_types(&self) -> Vec<&str> {
        vec![
            "menu",
            "food",
            "table",
            "order",
            "order_item",
            "invoice",
            "user",
        ]
    }

    fn register_entities(&self, registry: &mut EntityRegistry) {
        registry.register(Box::new(menu::MenuDescriptor));
        registry.register(Box::new(food::FoodDescriptor));
        registry.register(Box::new(table::TableDescriptor));
        registry.register(Box::new(order::OrderDescriptor));
        registry.register(Box::new(order_item::OrderItemDescriptor));
        registry.register(Box::new(invoice::InvoiceDescriptor));
        registry.register(Box::new(user::UserDescriptor));
    }
}
