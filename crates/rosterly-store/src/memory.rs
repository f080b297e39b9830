//! In-memory document store.
//!
//! The default backend for tests and local development. Collections live in
//! a process-wide map; ids are UUID v4 strings, never reused.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::{DocumentStore, StoreError, StoredDocument, merge_patch, order_key, stamp_created};

type Collections = HashMap<String, BTreeMap<String, Value>>;

/// In-process [`DocumentStore`] backed by a `HashMap` of collections.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<R>(&self, f: impl FnOnce(&Collections) -> R) -> Result<R, StoreError> {
        let guard = self
            .collections
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;
        Ok(f(&guard))
    }

    fn write<R>(&self, f: impl FnOnce(&mut Collections) -> R) -> Result<R, StoreError> {
        let mut guard = self
            .collections
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;
        Ok(f(&mut guard))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn scan(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        self.read(|cols| {
            cols.get(collection)
                .map(|docs| {
                    docs.iter()
                        .map(|(id, data)| StoredDocument {
                            id: id.clone(),
                            data: data.clone(),
                        })
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    async fn scan_ordered(
        &self,
        collection: &str,
        field: &str,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let mut docs = self.scan(collection).await?;
        docs.sort_by_key(|doc| order_key(&doc.data, field));
        Ok(docs)
    }

    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let docs = self.scan(collection).await?;
        Ok(docs
            .into_iter()
            .filter(|doc| doc.data.get(field) == Some(value))
            .collect())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        self.read(|cols| {
            cols.get(collection)
                .and_then(|docs| docs.get(id))
                .map(|data| StoredDocument {
                    id: id.to_string(),
                    data: data.clone(),
                })
        })
    }

    async fn insert(&self, collection: &str, mut data: Value) -> Result<StoredDocument, StoreError> {
        stamp_created(&mut data);
        let id = Uuid::new_v4().to_string();
        self.write(|cols| {
            cols.entry(collection.to_string())
                .or_default()
                .insert(id.clone(), data.clone());
        })?;
        Ok(StoredDocument { id, data })
    }

    async fn set(&self, collection: &str, id: &str, mut data: Value) -> Result<(), StoreError> {
        stamp_created(&mut data);
        self.write(|cols| {
            cols.entry(collection.to_string())
                .or_default()
                .insert(id.to_string(), data);
        })
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), StoreError> {
        self.write(|cols| {
            let existing = cols
                .get_mut(collection)
                .and_then(|docs| docs.get_mut(id))
                .ok_or_else(|| StoreError::NotFound {
                    collection: collection.to_string(),
                    id: id.to_string(),
                })?;
            merge_patch(existing, patch);
            Ok(())
        })?
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.write(|cols| {
            cols.get_mut(collection)
                .and_then(|docs| docs.remove(id))
                .map(|_| ())
                .ok_or_else(|| StoreError::NotFound {
                    collection: collection.to_string(),
                    id: id.to_string(),
                })
        })?
    }
}
