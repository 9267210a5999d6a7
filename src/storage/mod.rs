//! Document store adapter
//!
//! [`DocumentStore`] is the narrow interface every backend implements:
//! schemaless JSON documents grouped in named collections, addressed through
//! [`Filter`]s. Handlers never talk to a backend directly; they go through
//! [`Repository`], which bounds every call with a timeout and converts
//! backend failures into typed [`StorageError`](crate::core::error::StorageError)s.

pub mod filter;
pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;
pub mod repository;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

pub use filter::Filter;
pub use in_memory::InMemoryStore;
#[cfg(feature = "mongodb_backend")]
pub use mongodb::MongoStore;
pub use repository::{Repository, StoreTimeouts};

/// Result of an `update_one` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents matched by the filter (0 or 1)
    pub matched: u64,
    /// Documents actually changed
    pub modified: u64,
}

/// Generic document storage, one namespace per collection name
///
/// Documents are returned in insertion order. Implementations must be safe
/// to share across request handlers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// First document matching the filter
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Value>>;

    /// All documents matching the filter
    async fn find_many(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>>;

    /// Insert a single document
    async fn insert_one(&self, collection: &str, document: Value) -> Result<()>;

    /// Insert a batch of documents, returning how many were written
    async fn insert_many(&self, collection: &str, documents: Vec<Value>) -> Result<usize>;

    /// Merge `set` into the first matching document
    ///
    /// Never creates a document; a miss reports `matched: 0`.
    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        set: Map<String, Value>,
    ) -> Result<UpdateOutcome>;

    /// Number of documents matching the filter
    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64>;
}
