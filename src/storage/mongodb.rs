//! MongoDB storage backend using the official MongoDB async driver.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! restaurant-rs = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Storage model
//!
//! One MongoDB collection per document collection name (`food`, `order`,
//! `orderItem`, ...). Records are addressed by their own string key fields
//! (`food_id`, `order_id`, ...), never by `_id`, which is stripped on read.

use super::{DocumentStore, Filter, UpdateOutcome};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::{Client, Database};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document.
fn json_to_document(json: Value) -> Result<Document> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    match bson_val {
        Bson::Document(d) => Ok(d),
        _ => Err(anyhow!("Expected BSON document, got non-object")),
    }
}

/// Convert a BSON Document back into a serde_json::Value, dropping `_id`.
fn document_to_json(mut doc: Document) -> Value {
    doc.remove("_id");
    Bson::Document(doc).into_relaxed_extjson()
}

// ---------------------------------------------------------------------------
// MongoStore
// ---------------------------------------------------------------------------

/// Document store backed by a MongoDB database
///
/// # Example
///
/// ```rust,ignore
/// use restaurant::storage::MongoStore;
///
/// let store = MongoStore::connect("mongodb://localhost:27017", "restaurant").await?;
/// let repository = Repository::new(Arc::new(store), StoreTimeouts::default());
/// ```
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Create a new `MongoStore` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Connect to `uri` and use `database`
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| anyhow!("Failed to connect to MongoDB: {}", e))?;
        tracing::info!(database, "connected to MongoDB");
        Ok(Self::new(client.database(database)))
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.database.collection(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Value>> {
        let doc = self
            .collection(collection)
            .find_one(filter.to_document()?)
            .await
            .map_err(|e| anyhow!("Failed to find document: {}", e))?;

        Ok(doc.map(document_to_json))
    }

    async fn find_many(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>> {
        let cursor = self
            .collection(collection)
            .find(filter.to_document()?)
            .sort(doc! { "_id": 1 })
            .await
            .map_err(|e| anyhow!("Failed to query documents: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect documents: {}", e))?;

        Ok(docs.into_iter().map(document_to_json).collect())
    }

    async fn insert_one(&self, collection: &str, document: Value) -> Result<()> {
        let doc = json_to_document(document)?;
        self.collection(collection)
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to insert document: {}", e))?;
        Ok(())
    }

    async fn insert_many(&self, collection: &str, documents: Vec<Value>) -> Result<usize> {
        if documents.is_empty() {
            return Ok(0);
        }

        let docs = documents
            .into_iter()
            .map(json_to_document)
            .collect::<Result<Vec<_>>>()?;

        let result = self
            .collection(collection)
            .insert_many(docs)
            .await
            .map_err(|e| anyhow!("Failed to insert documents: {}", e))?;

        Ok(result.inserted_ids.len())
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        set: Map<String, Value>,
    ) -> Result<UpdateOutcome> {
        let set = json_to_document(Value::Object(set))?;
        let result = self
            .collection(collection)
            .update_one(filter.to_document()?, doc! { "$set": set })
            .await
            .map_err(|e| anyhow!("Failed to update document: {}", e))?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64> {
        self.collection(collection)
            .count_documents(filter.to_document()?)
            .await
            .map_err(|e| anyhow!("Failed to count documents: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_to_document_rejects_scalars() {
        assert!(json_to_document(json!("nope")).is_err());
        let doc = json_to_document(json!({"food_id": "f1", "price": 9.5})).unwrap();
        assert_eq!(doc.get_str("food_id").unwrap(), "f1");
    }

    #[test]
    fn test_document_to_json_strips_object_id() {
        let doc = doc! { "_id": mongodb::bson::oid::ObjectId::new(), "order_id": "o1" };
        let json = document_to_json(doc);
        assert_eq!(json, json!({"order_id": "o1"}));
    }

    #[test]
    fn test_filter_renders_in_clause() {
        let filter = Filter::by("order_id", "o1").any_of("food_id", ["a", "b"]);
        let rendered = filter.to_document().unwrap();
        assert_eq!(rendered.get_str("order_id").unwrap(), "o1");
        let food = rendered.get_document("food_id").unwrap();
        assert_eq!(food.get_array("$in").unwrap().len(), 2);
    }
}
