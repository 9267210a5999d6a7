//! Per-operation validation rules for a request payload

use crate::core::error::FieldValidationError;
use indexmap::IndexMap;
use serde_json::{Map, Value};

type FieldValidator = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;
type FieldFilter = Box<dyn Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync>;

/// Filters and validators for one payload type and one operation
///
/// Filters run first and rewrite present fields; validators then see every
/// declared field, with absent ones presented as `null`. Errors are collected
/// across all fields instead of stopping at the first.
///
/// ```rust,ignore
/// EntityValidationConfig::new("create")
///     .filter("name", filters::trim())
///     .validate("name", validators::required())
///     .validate("price", validators::positive())
///     .filter("price", filters::round_decimals(2));
/// ```
pub struct EntityValidationConfig {
    operation: String,
    validators: IndexMap<String, Vec<FieldValidator>>,
    filters: IndexMap<String, Vec<FieldFilter>>,
}

impl EntityValidationConfig {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            validators: IndexMap::new(),
            filters: IndexMap::new(),
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Add a validator for a field
    pub fn validate<V>(mut self, field: &str, validator: V) -> Self
    where
        V: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validators
            .entry(field.to_string())
            .or_default()
            .push(Box::new(validator));
        self
    }

    /// Add a filter for a field
    pub fn filter<F>(mut self, field: &str, filter: F) -> Self
    where
        F: Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.filters
            .entry(field.to_string())
            .or_default()
            .push(Box::new(filter));
        self
    }

    /// Apply filters, then validators
    pub fn validate_and_filter(
        &self,
        payload: Value,
    ) -> Result<Value, Vec<FieldValidationError>> {
        let Value::Object(mut object) = payload else {
            return Err(vec![FieldValidationError {
                field: "$".to_string(),
                message: "payload must be a JSON object".to_string(),
            }]);
        };

        let mut errors = Vec::new();
        self.apply_filters(&mut object, &mut errors);

        for (field, validators) in &self.validators {
            let value = object.get(field).unwrap_or(&Value::Null);
            for validator in validators {
                if let Err(message) = validator(field, value) {
                    errors.push(FieldValidationError {
                        field: field.clone(),
                        message,
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(Value::Object(object))
        } else {
            Err(errors)
        }
    }

    fn apply_filters(&self, object: &mut Map<String, Value>, errors: &mut Vec<FieldValidationError>) {
        for (field, filters) in &self.filters {
            let Some(mut value) = object.remove(field) else {
                continue;
            };
            for filter in filters {
                match filter(field, value.clone()) {
                    Ok(filtered) => value = filtered,
                    Err(e) => errors.push(FieldValidationError {
                        field: field.clone(),
                        message: e.to_string(),
                    }),
                }
            }
            object.insert(field.clone(), value);
        }
    }
}
