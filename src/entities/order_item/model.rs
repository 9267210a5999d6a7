use crate::core::money::{CURRENCY_PRECISION, MAX_PRICE};
use crate::core::validation::{EntityValidationConfig, ValidatableEntity, filters, validators};
use crate::impl_document;
use serde::{Deserialize, Serialize};
use serde_json::Value;

impl_document!(
    OrderItem,
    collection = "orderItem",
    entity_type = "order item",
    key = order_item_id,
    {
        order_id: String,
        food_id: String,
        quantity: i64,
        /// Rounded to two decimals before it is stored
        unit_price: f64,
    }
);

/// Body of `POST /orderItems`
///
/// Lines are kept raw here and validated one by one so that every bad line
/// is reported with its index.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemBatch {
    #[serde(default)]
    pub table_id: Option<String>,
    pub order_items: Vec<Value>,
}

impl ValidatableEntity for OrderItemBatch {
    fn validation_config(operation: &str) -> EntityValidationConfig {
        EntityValidationConfig::new(operation)
            .filter("table_id", filters::trim())
            .validate("table_id", validators::string_length(1, 64))
            .validate("order_items", validators::required())
            .validate("order_items", validators::non_empty_array())
    }
}

/// One line of an order-item batch
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemLine {
    pub food_id: String,
    pub quantity: i64,
    pub unit_price: f64,
}

fn line_rules(config: EntityValidationConfig) -> EntityValidationConfig {
    config
        .filter("food_id", filters::trim())
        .validate("food_id", validators::string_length(1, 64))
        .validate("quantity", validators::integer())
        .validate("quantity", validators::positive())
        .filter("unit_price", filters::round_decimals(CURRENCY_PRECISION))
        .validate("unit_price", validators::positive())
        .validate("unit_price", validators::max(MAX_PRICE))
}

impl ValidatableEntity for OrderItemLine {
    fn validation_config(operation: &str) -> EntityValidationConfig {
        line_rules(EntityValidationConfig::new(operation))
            .validate("food_id", validators::required())
            .validate("quantity", validators::required())
            .validate("unit_price", validators::required())
    }
}

/// Revisable fields of an order item; its order link never changes
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OrderItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_id: Option<String>,
}

impl ValidatableEntity for OrderItemUpdate {
    fn validation_config(operation: &str) -> EntityValidationConfig {
        line_rules(EntityValidationConfig::new(operation))
    }
}

/// Response of `POST /orderItems`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchInsertResult {
    pub order_id: String,
    pub inserted_count: usize,
    pub inserted_ids: Vec<String>,
}
