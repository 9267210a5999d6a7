//! Typed, timeout-bounded access to the document store

use super::{DocumentStore, Filter};
use crate::core::entity::Document;
use crate::core::error::{ServiceError, ServiceResult, StorageError};
use serde_json::{Map, Value};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Deadlines applied to store calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimeouts {
    /// Reads, counts and pipeline fetches
    pub read: Duration,
    /// Inserts and updates issued by handlers
    pub write: Duration,
    /// Parent order creation during an order-item batch
    pub order_insert: Duration,
}

impl Default for StoreTimeouts {
    fn default() -> Self {
        Self {
            read: Duration::from_secs(30),
            write: Duration::from_secs(30),
            order_insert: Duration::from_secs(5),
        }
    }
}

/// Store capability shared by every handler and service
///
/// Built once at startup and cloned into the application state. Every call
/// is bounded by one of the [`StoreTimeouts`]; an elapsed deadline surfaces
/// as [`StorageError::Timeout`], any backend error as
/// [`StorageError::OperationFailed`]. No call is retried.
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn DocumentStore>,
    timeouts: StoreTimeouts,
}

impl Repository {
    pub fn new(store: Arc<dyn DocumentStore>, timeouts: StoreTimeouts) -> Self {
        Self { store, timeouts }
    }

    pub fn timeouts(&self) -> StoreTimeouts {
        self.timeouts
    }

    /// Fetch a record by key, failing with NotFound when absent
    pub async fn get<T: Document>(&self, key: &str) -> ServiceResult<T> {
        self.find::<T>(key)
            .await?
            .ok_or_else(|| ServiceError::not_found(T::entity_type(), key))
    }

    /// Fetch a record by key
    pub async fn find<T: Document>(&self, key: &str) -> ServiceResult<Option<T>> {
        self.find_by::<T>(&Filter::by(T::key_field(), key)).await
    }

    /// First record matching the filter
    pub async fn find_by<T: Document>(&self, filter: &Filter) -> ServiceResult<Option<T>> {
        let doc = self
            .bounded(
                "find_one",
                T::collection(),
                self.timeouts.read,
                self.store.find_one(T::collection(), filter),
            )
            .await?;

        doc.map(from_document::<T>).transpose()
    }

    /// True when a record with this key exists
    pub async fn exists<T: Document>(&self, key: &str) -> ServiceResult<bool> {
        Ok(self.count::<T>(&Filter::by(T::key_field(), key)).await? > 0)
    }

    /// All records matching the filter, in insertion order
    pub async fn list<T: Document>(&self, filter: &Filter) -> ServiceResult<Vec<T>> {
        let docs = self
            .bounded(
                "find",
                T::collection(),
                self.timeouts.read,
                self.store.find_many(T::collection(), filter),
            )
            .await?;

        docs.into_iter().map(from_document::<T>).collect()
    }

    pub async fn count<T: Document>(&self, filter: &Filter) -> ServiceResult<u64> {
        self.bounded(
            "count",
            T::collection(),
            self.timeouts.read,
            self.store.count(T::collection(), filter),
        )
        .await
    }

    /// Insert a record under the write deadline
    pub async fn insert<T: Document>(&self, record: &T) -> ServiceResult<()> {
        self.insert_within(record, self.timeouts.write).await
    }

    /// Insert a record under an explicit deadline
    pub async fn insert_within<T: Document>(
        &self,
        record: &T,
        deadline: Duration,
    ) -> ServiceResult<()> {
        let doc = to_document(record)?;
        self.bounded(
            "insert_one",
            T::collection(),
            deadline,
            self.store.insert_one(T::collection(), doc),
        )
        .await
    }

    /// Insert a batch of records, returning how many were written
    pub async fn insert_many<T: Document>(&self, records: &[T]) -> ServiceResult<usize> {
        let docs = records
            .iter()
            .map(to_document)
            .collect::<ServiceResult<Vec<_>>>()?;

        self.bounded(
            "insert_many",
            T::collection(),
            self.timeouts.write,
            self.store.insert_many(T::collection(), docs),
        )
        .await
    }

    /// Apply `set` to the record with this key and return the stored result
    ///
    /// `updated_at` is always refreshed. Fails with NotFound when no record
    /// has the key; nothing is created.
    pub async fn update<T: Document>(
        &self,
        key: &str,
        mut set: Map<String, Value>,
    ) -> ServiceResult<T> {
        let updated_at = serde_json::to_value(crate::core::entity::now())
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        set.insert("updated_at".to_string(), updated_at);

        let outcome = self
            .bounded(
                "update_one",
                T::collection(),
                self.timeouts.write,
                self.store
                    .update_one(T::collection(), &Filter::by(T::key_field(), key), set),
            )
            .await?;

        if outcome.matched == 0 {
            return Err(ServiceError::not_found(T::entity_type(), key));
        }

        self.get::<T>(key).await
    }

    async fn bounded<R, F>(
        &self,
        operation: &str,
        collection: &str,
        deadline: Duration,
        call: F,
    ) -> ServiceResult<R>
    where
        F: Future<Output = anyhow::Result<R>>,
    {
        match tokio::time::timeout(deadline, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::error!(operation, collection, error = %e, "store call failed");
                Err(StorageError::OperationFailed {
                    operation: operation.to_string(),
                    collection: collection.to_string(),
                    message: e.to_string(),
                }
                .into())
            }
            Err(_) => {
                tracing::warn!(
                    operation,
                    collection,
                    timeout_ms = deadline.as_millis() as u64,
                    "store call timed out"
                );
                Err(StorageError::Timeout {
                    operation: operation.to_string(),
                    collection: collection.to_string(),
                    after: deadline,
                }
                .into())
            }
        }
    }
}

fn to_document<T: Document>(record: &T) -> ServiceResult<Value> {
    serde_json::to_value(record).map_err(|e| {
        StorageError::Serialization {
            collection: T::collection().to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

fn from_document<T: Document>(doc: Value) -> ServiceResult<T> {
    serde_json::from_value(doc).map_err(|e| {
        StorageError::Serialization {
            collection: T::collection().to_string(),
            message: e.to_string(),
        }
        .into()
    })
}
