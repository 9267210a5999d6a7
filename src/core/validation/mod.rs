//! Validation and filtering system
//!
//! Payload types declare their rules through [`ValidatableEntity`]; the
//! [`Validated`] extractor applies them before a handler runs.

pub mod config;
pub mod extractor;
pub mod filters;
pub mod validators;

pub use config::EntityValidationConfig;
pub use extractor::{ValidatableEntity, Validated, validate_payload};
