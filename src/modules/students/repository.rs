use std::sync::Arc;

use chrono::Local;
use rosterly_models::students::{NewStudent, Student, StudentPatch};
use rosterly_store::{DocumentStore, StoreError, StoredDocument};
use tracing::{error, instrument};

use crate::utils::errors::AppError;

/// Sentinel course value meaning "no filter".
pub const ALL_COURSES: &str = "All";

/// Thin mapping from roster operations to document-store queries.
///
/// Reads fail soft: a store failure degrades to an empty result with a
/// diagnostic log so the caller can render an empty state. Writes fail
/// loud: the caller must block and report per write. Do not unify the two.
pub struct StudentRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl StudentRepository {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Every student, ordered by name ascending (store order,
    /// case-sensitive). Failure degrades to an empty list.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Vec<Student> {
        let result = self
            .store
            .scan_ordered(&self.collection, "name")
            .await
            .and_then(collect_students);
        match result {
            Ok(students) => students,
            Err(err) => {
                error!(error = %err, "failed to list students");
                Vec::new()
            }
        }
    }

    /// Students enrolled in `course`, sorted by name locally.
    ///
    /// The store's equality query cannot also order by name without an
    /// extra index, so ordering happens after the fetch, case-insensitive.
    /// Failure degrades to an empty list.
    #[instrument(skip(self))]
    pub async fn list_by_course(&self, course: &str) -> Vec<Student> {
        let result = self
            .store
            .query_eq(&self.collection, "course", &course.into())
            .await
            .and_then(collect_students);
        match result {
            Ok(mut students) => {
                students.sort_by_key(|s| s.name.to_lowercase());
                students
            }
            Err(err) => {
                error!(error = %err, course, "failed to list students by course");
                Vec::new()
            }
        }
    }

    /// One student by id. `Ok(None)` means the id does not exist; `Err`
    /// means the store failed.
    #[instrument(skip(self))]
    pub async fn get_one(&self, id: &str) -> Result<Option<Student>, AppError> {
        let doc = self
            .store
            .get(&self.collection, id)
            .await
            .map_err(AppError::store)?;
        doc.map(StoredDocument::deserialize)
            .transpose()
            .map_err(AppError::store)
    }

    /// Create a student and return it with its assigned id.
    ///
    /// Stamps `enrollment_date` with today's date when the draft omits it;
    /// the store stamps `createdAt`. Validation is the caller's job.
    /// Propagates failure.
    #[instrument(skip(self, draft))]
    pub async fn create(&self, mut draft: NewStudent) -> Result<Student, AppError> {
        if draft.enrollment_date.is_none() {
            draft.enrollment_date = Some(Local::now().date_naive());
        }
        let data = serde_json::to_value(&draft)?;
        let doc = self
            .store
            .insert(&self.collection, data)
            .await
            .map_err(AppError::store)?;
        doc.deserialize().map_err(AppError::store)
    }

    /// Merge the given fields onto an existing student; the store stamps
    /// `updatedAt`. Propagates failure.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: StudentPatch) -> Result<(), AppError> {
        let data = serde_json::to_value(&patch)?;
        self.store
            .update(&self.collection, id, data)
            .await
            .map_err(AppError::store)
    }

    /// Remove a student by id. Propagates failure.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.store
            .delete(&self.collection, id)
            .await
            .map_err(AppError::store)
    }

    /// Distinct course values with the `"All"` sentinel first, exactly
    /// once. The rest keep no guaranteed order. Failure degrades to
    /// `["All"]`.
    #[instrument(skip(self))]
    pub async fn list_available_courses(&self) -> Vec<String> {
        let mut courses = vec![ALL_COURSES.to_string()];
        match self.store.scan(&self.collection).await {
            Ok(docs) => {
                for doc in docs {
                    if let Some(course) = doc.data.get("course").and_then(|v| v.as_str()) {
                        if !course.is_empty() && !courses.iter().any(|c| c == course) {
                            courses.push(course.to_string());
                        }
                    }
                }
            }
            Err(err) => {
                error!(error = %err, "failed to collect courses");
            }
        }
        courses
    }
}

fn collect_students(docs: Vec<StoredDocument>) -> Result<Vec<Student>, StoreError> {
    docs.into_iter().map(StoredDocument::deserialize).collect()
}
