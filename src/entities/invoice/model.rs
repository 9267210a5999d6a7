use crate::core::validation::{EntityValidationConfig, ValidatableEntity, filters, validators};
use crate::impl_document;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status stored when an invoice is created without one
pub const DEFAULT_PAYMENT_STATUS: &str = "PENDING";

const PAYMENT_METHODS: [&str; 2] = ["CARD", "CASH"];
const PAYMENT_STATUSES: [&str; 2] = ["PENDING", "PAID"];

impl_document!(
    Invoice,
    collection = "invoice",
    entity_type = "invoice",
    key = invoice_id,
    {
        order_id: String,
        #[serde(default)]
        payment_method: Option<String>,
        #[serde(default)]
        payment_status: Option<String>,
        payment_due_date: DateTime<Utc>,
    }
);

#[derive(Debug, Clone, Deserialize)]
pub struct NewInvoice {
    pub order_id: String,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InvoiceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
}

fn invoice_rules(config: EntityValidationConfig) -> EntityValidationConfig {
    config
        .filter("payment_method", filters::trim())
        .filter("payment_method", filters::uppercase())
        .validate(
            "payment_method",
            validators::in_list(PAYMENT_METHODS.iter().map(|m| m.to_string()).collect()),
        )
        .filter("payment_status", filters::trim())
        .filter("payment_status", filters::uppercase())
        .validate(
            "payment_status",
            validators::in_list(PAYMENT_STATUSES.iter().map(|s| s.to_string()).collect()),
        )
}

impl ValidatableEntity for NewInvoice {
    fn validation_config(operation: &str) -> EntityValidationConfig {
        invoice_rules(EntityValidationConfig::new(operation))
            .filter("order_id", filters::trim())
            .validate("order_id", validators::required())
    }
}

impl ValidatableEntity for InvoiceUpdate {
    fn validation_config(operation: &str) -> EntityValidationConfig {
        invoice_rules(EntityValidationConfig::new(operation))
    }
}
