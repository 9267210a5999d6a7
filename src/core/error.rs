//! Typed error handling for the restaurant service
//!
//! Every fallible service operation returns [`ServiceError`], which groups
//! failures into categories so that handlers can map them to HTTP responses
//! and callers can match on the specific case they care about.
//!
//! # Error Categories
//!
//! - [`EntityError`]: a referenced record is missing or conflicts with another
//! - [`ValidationError`]: the input failed structural or field constraints
//! - [`StorageError`]: the document store failed or timed out
//! - [`RequestError`]: the caller is not authenticated or not allowed
//!
//! # Example
//!
//! ```rust,ignore
//! match repository.get::<Table>(&table_id).await {
//!     Ok(table) => println!("table #{}", table.table_number),
//!     Err(ServiceError::Entity(EntityError::NotFound { id, .. })) => {
//!         println!("table {} not found", id);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Convenience alias used across services and handlers
pub type ServiceResult<T> = Result<T, ServiceError>;

/// The main error type of the service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Entity-related errors (lookups, uniqueness)
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Input validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Document store errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Authentication/authorization errors
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ServiceError {
    /// Shorthand for a missing entity
    pub fn not_found(entity_type: &str, id: impl Into<String>) -> Self {
        ServiceError::Entity(EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.into(),
        })
    }

    /// Shorthand for a single invalid field
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        ServiceError::Validation(ValidationError::FieldError {
            field: field.to_string(),
            message: message.into(),
        })
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Entity(e) => e.status_code(),
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Storage(e) => e.status_code(),
            ServiceError::Request(e) => e.status_code(),
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::Entity(e) => e.error_code(),
            ServiceError::Validation(_) => "VALIDATION_ERROR",
            ServiceError::Storage(e) => e.error_code(),
            ServiceError::Request(e) => e.error_code(),
            ServiceError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True when the failure came from a store call that exceeded its deadline
    pub fn is_timeout(&self) -> bool {
        matches!(self, ServiceError::Storage(StorageError::Timeout { .. }))
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ServiceError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id,
                }))
            }
            ServiceError::Entity(EntityError::AlreadyExists {
                entity_type,
                field,
                value,
            }) => Some(serde_json::json!({
                "entity_type": entity_type,
                "field": field,
                "value": value,
            })),
            ServiceError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups and uniqueness
#[derive(Debug, Error)]
pub enum EntityError {
    /// Referenced entity was not found
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: String },

    /// A unique field value is already taken
    #[error("{entity_type} with {field} '{value}' already exists")]
    AlreadyExists {
        entity_type: String,
        field: String,
        value: String,
    },
}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::AlreadyExists { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Single field validation error
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Body is not valid JSON or does not match the expected shape
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by the document store adapter
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store call did not finish within its deadline
    #[error("{operation} on '{collection}' timed out after {}ms", .after.as_millis())]
    Timeout {
        operation: String,
        collection: String,
        after: Duration,
    },

    /// The store reported a failure
    #[error("{operation} on '{collection}' failed: {message}")]
    OperationFailed {
        operation: String,
        collection: String,
        message: String,
    },

    /// A stored document could not be converted to or from its model
    #[error("Failed to (de)serialize {collection} document: {message}")]
    Serialization { collection: String, message: String },
}

impl StorageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Timeout { .. } => "STORAGE_TIMEOUT",
            StorageError::OperationFailed { .. } => "STORAGE_ERROR",
            StorageError::Serialization { .. } => "STORAGE_SERIALIZATION_ERROR",
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to the calling principal
#[derive(Debug, Error)]
pub enum RequestError {
    /// Missing or invalid credentials
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::Unauthorized { .. } => "UNAUTHORIZED",
        }
    }
}
