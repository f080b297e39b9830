//! JSON-file-backed document store.
//!
//! Persists each collection as one pretty-printed JSON object
//! (`<data_dir>/<collection>.json`, id → document) on local disk. Every
//! operation is a read-modify-write of the whole collection file, serialized
//! by a mutex, which is plenty for the admin CLI this backend exists for.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::{DocumentStore, StoreError, StoredDocument, merge_patch, order_key, stamp_created};

type CollectionData = BTreeMap<String, Value>;

/// [`DocumentStore`] backed by per-collection JSON files.
pub struct JsonFileStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", collection))
    }

    async fn load(&self, collection: &str) -> Result<CollectionData, StoreError> {
        let path = self.collection_path(collection);
        match fs::read(&path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(CollectionData::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn persist(&self, collection: &str, data: &CollectionData) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.collection_path(collection);
        let bytes = serde_json::to_vec_pretty(data)?;
        fs::write(&path, bytes).await?;
        debug!(collection, path = %path.display(), "collection persisted");
        Ok(())
    }
}

impl std::fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("dir", &self.dir)
            .finish()
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn scan(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let docs = self.load(collection).await?;
        Ok(docs
            .into_iter()
            .map(|(id, data)| StoredDocument { id, data })
            .collect())
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
        let docs = self.load(collection).await?;
        Ok(docs.get(id).map(|data| StoredDocument {
            id: id.to_string(),
            data: data.clone(),
        }))
    }

    async fn insert(&self, collection: &str, mut data: Value) -> Result<StoredDocument, StoreError> {
        let _guard = self.write_lock.lock().await;
        stamp_created(&mut data);
        let id = Uuid::new_v4().to_string();
        let mut docs = self.load(collection).await?;
        docs.insert(id.clone(), data.clone());
        self.persist(collection, &docs).await?;
        Ok(StoredDocument { id, data })
    }

    async fn set(&self, collection: &str, id: &str, mut data: Value) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        stamp_created(&mut data);
        let mut docs = self.load(collection).await?;
        docs.insert(id.to_string(), data);
        self.persist(collection, &docs).await
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut docs = self.load(collection).await?;
        let existing = docs.get_mut(id).ok_or_else(|| StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        })?;
        merge_patch(existing, patch);
        self.persist(collection, &docs).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut docs = self.load(collection).await?;
        if docs.remove(id).is_none() {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        self.persist(collection, &docs).await
    }
}
