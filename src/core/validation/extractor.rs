//! Axum extractor for validated payloads
//!
//! This module provides the `Validated<T>` extractor that filters and
//! validates request bodies before they reach handlers.

use super::config::EntityValidationConfig;
use crate::core::error::{ServiceError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Trait for payloads that carry validation rules
pub trait ValidatableEntity {
    /// Get the validation configuration for a specific operation
    fn validation_config(operation: &str) -> EntityValidationConfig;
}

/// Axum extractor that filters, validates and then deserializes a payload
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_food(
///     State(state): State<AppState>,
///     Validated(payload): Validated<NewFood>,
/// ) -> ServiceResult<(StatusCode, Json<Food>)> {
///     // payload is already trimmed, rounded and checked
/// }
/// ```
pub struct Validated<T>(pub T);

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: ValidatableEntity + DeserializeOwned + Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let operation = match req.method().as_str() {
            "PUT" | "PATCH" => "update",
            _ => "create",
        };

        let Json(payload): Json<Value> = Json::from_request(req, state)
            .await
            .map_err(|e| ValidationError::InvalidJson {
                message: e.body_text(),
            })?;

        validate_payload::<T>(operation, payload).map(Validated)
    }
}

/// Run a payload through `T`'s rules for `operation` and deserialize it
pub fn validate_payload<T>(operation: &str, payload: Value) -> Result<T, ServiceError>
where
    T: ValidatableEntity + DeserializeOwned,
{
    let filtered = T::validation_config(operation)
        .validate_and_filter(payload)
        .map_err(ValidationError::FieldErrors)?;

    serde_json::from_value(filtered).map_err(|e| {
        ValidationError::InvalidJson {
            message: e.to_string(),
        }
        .into()
    })
}
