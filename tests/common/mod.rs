use std::sync::Arc;

use async_trait::async_trait;
use rosterly::StudentRepository;
use rosterly_models::students::NewStudent;
use rosterly_store::{DocumentStore, MemoryStore, StoreError, StoredDocument};
use serde_json::Value;

#[allow(dead_code)]
pub const STUDENTS: &str = "students";
#[allow(dead_code)]
pub const USERS: &str = "users";

/// Store double where every operation fails, for exercising the
/// soft-fail-reads / hard-fail-writes contract.
pub struct FailingStore;

impl FailingStore {
    fn unavailable() -> StoreError {
        StoreError::Unavailable("store offline".to_string())
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn scan(&self, _collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        Err(Self::unavailable())
    }

    async fn scan_ordered(
        &self,
        _collection: &str,
        _field: &str,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        Err(Self::unavailable())
    }

    async fn query_eq(
        &self,
        _collection: &str,
        _field: &str,
        _value: &Value,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        Err(Self::unavailable())
    }

    async fn get(
        &self,
        _collection: &str,
        _id: &str,
    ) -> Result<Option<StoredDocument>, StoreError> {
        Err(Self::unavailable())
    }

    async fn insert(&self, _collection: &str, _data: Value) -> Result<StoredDocument, StoreError> {
        Err(Self::unavailable())
    }

    async fn set(&self, _collection: &str, _id: &str, _data: Value) -> Result<(), StoreError> {
        Err(Self::unavailable())
    }

    async fn update(&self, _collection: &str, _id: &str, _patch: Value) -> Result<(), StoreError> {
        Err(Self::unavailable())
    }

    async fn delete(&self, _collection: &str, _id: &str) -> Result<(), StoreError> {
        Err(Self::unavailable())
    }
}

/// Repository over a fresh in-memory store, returned alongside the store so
/// tests can inspect it directly.
pub fn memory_repo() -> (Arc<MemoryStore>, StudentRepository) {
    let store = Arc::new(MemoryStore::new());
    let repo = StudentRepository::new(store.clone(), STUDENTS);
    (store, repo)
}

#[allow(dead_code)]
pub fn failing_repo() -> StudentRepository {
    StudentRepository::new(Arc::new(FailingStore), STUDENTS)
}

#[allow(dead_code)]
pub fn draft(name: &str, email: &str, course: &str, gpa: f64) -> NewStudent {
    NewStudent {
        name: name.to_string(),
        email: email.to_string(),
        course: course.to_string(),
        gpa,
        enrollment_date: None,
        added_by: None,
        added_by_email: None,
    }
}
