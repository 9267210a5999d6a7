//! In-memory implementation of DocumentStore for testing and development

use super::{DocumentStore, Filter, UpdateOutcome};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory document store
///
/// Useful for testing and development. Each collection is a vector of
/// documents kept in insertion order behind a shared `RwLock`.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<Value>>>>,
}

impl InMemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Value>> {
        let collections = self
            .collections
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc)))
            .cloned())
    }

    async fn find_many(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>> {
        let collections = self
            .collections
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| filter.matches(doc)).cloned().collect())
            .unwrap_or_default())
    }

    async fn insert_one(&self, collection: &str, document: Value) -> Result<()> {
        if !document.is_object() {
            return Err(anyhow!("Expected a JSON object document"));
        }

        let mut collections = self
            .collections
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(())
    }

    async fn insert_many(&self, collection: &str, documents: Vec<Value>) -> Result<usize> {
        if documents.iter().any(|doc| !doc.is_object()) {
            return Err(anyhow!("Expected JSON object documents"));
        }

        let mut collections = self
            .collections
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let inserted = documents.len();
        collections
            .entry(collection.to_string())
            .or_default()
            .extend(documents);

        Ok(inserted)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        set: Map<String, Value>,
    ) -> Result<UpdateOutcome> {
        let mut collections = self
            .collections
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(docs) = collections.get_mut(collection) else {
            return Ok(UpdateOutcome::default());
        };

        if let Some(Value::Object(existing)) = docs.iter_mut().find(|doc| filter.matches(doc)) {
            let mut modified = false;
            for (key, value) in set {
                if existing.get(&key) != Some(&value) {
                    existing.insert(key, value);
                    modified = true;
                }
            }
            return Ok(UpdateOutcome {
                matched: 1,
                modified: u64::from(modified),
            });
        }

        Ok(UpdateOutcome::default())
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64> {
        let collections = self
            .collections
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| filter.matches(doc)).count() as u64)
            .unwrap_or(0))
    }
}
