use crate::core::validation::{EntityValidationConfig, ValidatableEntity, filters, validators};
use crate::impl_document;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

impl_document!(
    Order,
    collection = "order",
    entity_type = "order",
    key = order_id,
    {
        /// Table the order is served at; may be unset at creation
        #[serde(default)]
        table_id: Option<String>,
        order_date: DateTime<Utc>,
    }
);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewOrder {
    #[serde(default)]
    pub table_id: Option<String>,
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OrderUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<DateTime<Utc>>,
}

fn order_rules(config: EntityValidationConfig) -> EntityValidationConfig {
    config
        .filter("table_id", filters::trim())
        .validate("table_id", validators::string_length(1, 64))
        .validate("order_date", validators::rfc3339())
}

impl ValidatableEntity for NewOrder {
    fn validation_config(operation: &str) -> EntityValidationConfig {
        order_rules(EntityValidationConfig::new(operation))
    }
}

impl ValidatableEntity for OrderUpdate {
    fn validation_config(operation: &str) -> EntityValidationConfig {
        order_rules(EntityValidationConfig::new(operation))
    }
}
