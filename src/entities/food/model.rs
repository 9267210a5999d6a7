use crate::core::money::{CURRENCY_PRECISION, MAX_PRICE};
use crate::core::validation::{EntityValidationConfig, ValidatableEntity, filters, validators};
use crate::impl_document;
use serde::{Deserialize, Serialize};

impl_document!(
    Food,
    collection = "food",
    entity_type = "food",
    key = food_id,
    {
        name: String,
        /// Unit price, always stored rounded to two decimals
        price: f64,
        food_image: String,
        menu_id: String,
    }
);

#[derive(Debug, Clone, Deserialize)]
pub struct NewFood {
    pub name: String,
    pub price: f64,
    pub food_image: String,
    pub menu_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FoodUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_id: Option<String>,
}

fn food_rules(config: EntityValidationConfig) -> EntityValidationConfig {
    config
        .filter("name", filters::trim())
        .validate("name", validators::string_length(2, 100))
        .filter("price", filters::round_decimals(CURRENCY_PRECISION))
        .validate("price", validators::positive())
        .validate("price", validators::max(MAX_PRICE))
        .filter("food_image", filters::trim())
        .filter("menu_id", filters::trim())
}

impl ValidatableEntity for NewFood {
    fn validation_config(operation: &str) -> EntityValidationConfig {
        food_rules(EntityValidationConfig::new(operation))
            .validate("name", validators::required())
            .validate("price", validators::required())
            .validate("food_image", validators::required())
            .validate("menu_id", validators::required())
    }
}

impl ValidatableEntity for FoodUpdate {
    fn validation_config(operation: &str) -> EntityValidationConfig {
        food_rules(EntityValidationConfig::new(operation))
    }
}
