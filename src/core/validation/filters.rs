//! Reusable field filters
//!
//! These filters transform field values before validation

use crate::core::money::round_to;
use anyhow::Result;
use serde_json::{Value, json};

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.trim().to_string()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: convert string to uppercase
pub fn uppercase() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.to_uppercase()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: convert string to lowercase
pub fn lowercase() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.to_lowercase()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: round number to specified decimal places, ties away from zero
pub fn round_decimals(
    decimals: u32,
) -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    move |_: &str, value: Value| {
        if let Some(num) = value.as_f64() {
            Ok(json!(round_to(num, decimals)))
        } else {
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim() {
        let f = trim();
        assert_eq!(f("name", json!("  hello  ")).unwrap(), json!("hello"));
        assert_eq!(f("age", json!(42)).unwrap(), json!(42));
        assert_eq!(f("name", json!(null)).unwrap(), json!(null));
    }

    #[test]
    fn test_case_filters() {
        assert_eq!(uppercase()("method", json!("card")).unwrap(), json!("CARD"));
        assert_eq!(
            lowercase()("email", json!("Ada@Example.COM")).unwrap(),
            json!("ada@example.com")
        );
        assert_eq!(uppercase()("count", json!(true)).unwrap(), json!(true));
    }

    #[test]
    fn test_round_decimals() {
        let f = round_decimals(2);
        assert_eq!(f("price", json!(3.14159)).unwrap(), json!(3.14));
        assert_eq!(f("price", json!(2.005)).unwrap(), json!(2.01));
        assert_eq!(f("price", json!(-2.005)).unwrap(), json!(-2.01));
        assert_eq!(f("price", json!("free")).unwrap(), json!("free"));
    }

    #[test]
    fn test_round_decimals_integer_input() {
        let f = round_decimals(2);
        assert_eq!(f("price", json!(42)).unwrap(), json!(42.0));
    }
}
