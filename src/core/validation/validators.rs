//! Reusable field validators
//!
//! A validator receives the field name and its (possibly null) value. Type
//! mismatches are left to other validators, so `positive()` ignores strings
//! and `string_length()` ignores numbers.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use validator::ValidateEmail;

/// Validator: field is required (not null)
pub fn required() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_null() {
            Err(format!("'{}' is required", field))
        } else {
            Ok(())
        }
    }
}

/// Validator: number must be strictly positive
pub fn positive() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_f64() {
        Some(num) if num <= 0.0 => Err(format!("'{}' must be positive (got {})", field, num)),
        _ => Ok(()),
    }
}

/// Validator: number must not exceed `limit`
pub fn max(limit: f64) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| match value.as_f64() {
        Some(num) if num > limit => Err(format!(
            "'{}' must be at most {} (got {})",
            field, limit, num
        )),
        _ => Ok(()),
    }
}

/// Validator: number must be an integer
pub fn integer() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_number() && value.as_i64().is_none() && value.as_u64().is_none() {
            Err(format!("'{}' must be a whole number", field))
        } else {
            Ok(())
        }
    }
}

/// Validator: string length (in characters) must be within range
pub fn string_length(
    min: usize,
    max: usize,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        let Some(s) = value.as_str() else {
            return Ok(());
        };
        let len = s.chars().count();
        if len < min {
            Err(format!(
                "'{}' must be at least {} characters (got {})",
                field, min, len
            ))
        } else if len > max {
            Err(format!(
                "'{}' must be at most {} characters (got {})",
                field, max, len
            ))
        } else {
            Ok(())
        }
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: Vec<String>,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| match value.as_str() {
        Some(s) if !allowed.iter().any(|a| a == s) => Err(format!(
            "'{}' must be one of {:?} (got {})",
            field, allowed, s
        )),
        _ => Ok(()),
    }
}

/// Validator: value must be a non-empty array
pub fn non_empty_array() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Array(items) if items.is_empty() => {
            Err(format!("'{}' must contain at least one entry", field))
        }
        Value::Array(_) | Value::Null => Ok(()),
        _ => Err(format!("'{}' must be an array", field)),
    }
}

/// Validator: string must be a syntactically valid email address
pub fn email() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_str() {
        Some(s) if !s.validate_email() => Err(format!("'{}' must be a valid email address", field)),
        _ => Ok(()),
    }
}

/// Validator: string must look like a phone number
pub fn phone() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        static PHONE: OnceLock<Option<Regex>> = OnceLock::new();
        let pattern = PHONE.get_or_init(|| Regex::new(r"^\+?[0-9][0-9 ().-]{5,19}$").ok());

        match (value.as_str(), pattern) {
            (Some(s), Some(re)) if !re.is_match(s) => {
                Err(format!("'{}' must be a valid phone number", field))
            }
            _ => Ok(()),
        }
    }
}

/// Validator: string must be an RFC 3339 timestamp
pub fn rfc3339() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_str() {
        Some(s) if chrono::DateTime::parse_from_rfc3339(s).is_err() => Err(format!(
            "'{}' must be an RFC 3339 timestamp (got {})",
            field, s
        )),
        _ => Ok(()),
    }
}
