//! Document trait shared by every persisted record

use crate::core::error::{ServiceError, ServiceResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A record stored in its own collection and addressed by a string key field
///
/// Keys are application-generated (see [`new_key`]) and never the store's
/// internal primary key, so records can reference each other across
/// collections (`order_id`, `food_id`, `table_id`, ...).
///
/// Implemented by the `impl_document!` macro.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name in the store (e.g. "orderItem")
    fn collection() -> &'static str;

    /// Name of the key field (e.g. "order_item_id")
    fn key_field() -> &'static str;

    /// Human-readable type name used in error messages (e.g. "order item")
    fn entity_type() -> &'static str;

    /// The key of this instance
    fn key(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc>;
}

/// Collect the present fields of a partial update into a `$set` map
///
/// Update payloads mark their fields `skip_serializing_if = "Option::is_none"`
/// so that only the supplied ones end up here.
pub fn changes<T: Serialize>(update: &T) -> ServiceResult<Map<String, Value>> {
    match serde_json::to_value(update) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ServiceError::Internal(
            "update payload did not serialize to an object".to_string(),
        )),
        Err(e) => Err(ServiceError::Internal(e.to_string())),
    }
}

/// Generate a fresh record key
pub fn new_key() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Current time truncated to whole seconds, the precision stored timestamps carry
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now)
}
