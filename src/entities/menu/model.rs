use crate::core::validation::{EntityValidationConfig, ValidatableEntity, filters, validators};
use crate::impl_document;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

impl_document!(
    Menu,
    collection = "menu",
    entity_type = "menu",
    key = menu_id,
    {
        name: String,
        category: String,
        #[serde(default)]
        start_date: Option<DateTime<Utc>>,
        #[serde(default)]
        end_date: Option<DateTime<Utc>>,
    }
);

/// A menu is only scheduled when it starts in the future and ends after it starts
pub fn in_time_span(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start > now && end > start
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMenu {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MenuUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

fn menu_rules(config: EntityValidationConfig) -> EntityValidationConfig {
    config
        .filter("name", filters::trim())
        .validate("name", validators::string_length(2, 100))
        .filter("category", filters::trim())
        .validate("category", validators::string_length(1, 100))
        .validate("start_date", validators::rfc3339())
        .validate("end_date", validators::rfc3339())
}

impl ValidatableEntity for NewMenu {
    fn validation_config(operation: &str) -> EntityValidationConfig {
        menu_rules(EntityValidationConfig::new(operation))
            .validate("name", validators::required())
            .validate("category", validators::required())
    }
}

impl ValidatableEntity for MenuUpdate {
    fn validation_config(operation: &str) -> EntityValidationConfig {
        menu_rules(EntityValidationConfig::new(operation))
    }
}
