use crate::core::validation::{EntityValidationConfig, ValidatableEntity, validators};
use crate::impl_document;
use serde::{Deserialize, Serialize};

impl_document!(
    Table,
    collection = "table",
    entity_type = "table",
    key = table_id,
    {
        number_of_guests: i64,
        /// Seat number shown to staff, unique across tables
        table_number: i64,
    }
);

#[derive(Debug, Clone, Deserialize)]
pub struct NewTable {
    pub number_of_guests: i64,
    pub table_number: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TableUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_guests: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<i64>,
}

fn table_rules(config: EntityValidationConfig) -> EntityValidationConfig {
    config
        .validate("number_of_guests", validators::integer())
        .validate("number_of_guests", validators::positive())
        .validate("table_number", validators::integer())
        .validate("table_number", validators::positive())
}

impl ValidatableEntity for NewTable {
    fn validation_config(operation: &str) -> EntityValidationConfig {
        table_rules(EntityValidationConfig::new(operation))
            .validate("number_of_guests", validators::required())
            .validate("table_number", validators::required())
    }
}

impl ValidatableEntity for TableUpdate {
    fn validation_config(operation: &str) -> EntityValidationConfig {
        table_rules(EntityValidationConfig::new(operation))
    }
}
