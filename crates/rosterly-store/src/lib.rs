//! # Rosterly Store
//!
//! Document-store abstraction layer.
//!
//! This crate defines the generic interface through which the application
//! consumes its document database: schema-less collections of JSON documents
//! keyed by opaque string ids. The hosted store stays an external
//! collaborator behind [`DocumentStore`]; implementations can be swapped
//! without changing business logic.
//!
//! Two local backends ship with the crate:
//!
//! - [`MemoryStore`]: in-process store used by tests and development
//! - [`JsonFileStore`]: one JSON file per collection on local disk, used by
//!   the admin CLI
//!
//! Timestamps are the store's job: every backend stamps `createdAt` when a
//! document is first written and `updatedAt` on every partial update, the
//! way a hosted store assigns server timestamps.

pub mod error;
pub mod file;
pub mod memory;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A document together with its store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub data: Value,
}

impl StoredDocument {
    /// Deserialize the document into a typed value, folding the id into an
    /// `id` field the way roster entities expect it.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, StoreError> {
        let mut data = self.data;
        if let Value::Object(map) = &mut data {
            map.insert("id".to_string(), Value::String(self.id));
        }
        serde_json::from_value(data).map_err(StoreError::Serde)
    }
}

/// Abstract trait for document-store backends.
///
/// The operations are exactly the ones the roster consumes: full scans,
/// an order-by scan, equality queries, and per-document CRUD. Each call is
/// independent; there are no transactions and no cross-document guarantees.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return every document in a collection, in no guaranteed order.
    async fn scan(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError>;

    /// Return every document ordered ascending by a string field
    /// (case-sensitive byte order, the store default). Documents missing
    /// the field sort first.
    async fn scan_ordered(
        &self,
        collection: &str,
        field: &str,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// Return documents whose `field` equals `value`.
    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// Fetch one document by id.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError>;

    /// Insert a document under a freshly assigned id and return it, with
    /// `createdAt` stamped.
    async fn insert(&self, collection: &str, data: Value) -> Result<StoredDocument, StoreError>;

    /// Create or replace the document at a caller-chosen id. Stamps
    /// `createdAt` unless the incoming data already carries one.
    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<(), StoreError>;

    /// Merge the given top-level fields onto an existing document and stamp
    /// `updatedAt`. Fails with [`StoreError::NotFound`] if the id is absent.
    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), StoreError>;

    /// Delete a document by id. Fails with [`StoreError::NotFound`] if the
    /// id is absent.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Current time in the wire form the store writes for server timestamps.
pub(crate) fn server_timestamp() -> Value {
    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Stamp `createdAt` on a new document unless the caller already set one.
pub(crate) fn stamp_created(data: &mut Value) {
    if let Value::Object(map) = data {
        map.entry("createdAt").or_insert_with(server_timestamp);
    }
}

/// Merge a patch onto an existing document and stamp `updatedAt`.
pub(crate) fn merge_patch(existing: &mut Value, patch: Value) {
    if let (Value::Object(target), Value::Object(fields)) = (existing, patch) {
        for (key, value) in fields {
            target.insert(key, value);
        }
        target.insert("updatedAt".to_string(), server_timestamp());
    }
}

/// Byte-order comparison key for `scan_ordered`; absent fields sort first.
pub(crate) fn order_key(data: &Value, field: &str) -> String {
    data.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
