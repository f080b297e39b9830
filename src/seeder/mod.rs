//! Sample-data bootstrap for the students collection.
//!
//! [`check_and_seed`] fills an empty roster with a fixed sample set so a
//! fresh deployment has something to show. Inserts are sequential with no
//! transaction around them; a failure after N of 7 leaves a partially
//! seeded collection that later runs treat as already seeded. Known gap,
//! kept to match the documented contract.

use rosterly_store::DocumentStore;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::utils::errors::AppError;

/// Actor recorded on seeded records when no user id is supplied.
const SYSTEM_ACTOR: &str = "system";

/// What a seeding run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The collection was empty and `count` records were inserted.
    Seeded { count: usize },
    /// The collection already had `existing` records; nothing was added.
    AlreadySeeded { existing: usize },
}

/// The fixed sample roster.
pub fn sample_students() -> Vec<Value> {
    vec![
        json!({
            "name": "John Doe",
            "email": "john.doe@example.com",
            "course": "Computer Science",
            "enrollmentDate": "2023-09-01",
            "gpa": 3.8
        }),
        json!({
            "name": "Jane Smith",
            "email": "jane.smith@example.com",
            "course": "Data Science",
            "enrollmentDate": "2023-08-15",
            "gpa": 3.9
        }),
        json!({
            "name": "Michael Johnson",
            "email": "michael.johnson@example.com",
            "course": "Artificial Intelligence",
            "enrollmentDate": "2023-09-05",
            "gpa": 3.7
        }),
        json!({
            "name": "Sarah Williams",
            "email": "sarah.williams@example.com",
            "course": "Computer Science",
            "enrollmentDate": "2023-08-20",
            "gpa": 3.6
        }),
        json!({
            "name": "Robert Brown",
            "email": "robert.brown@example.com",
            "course": "Cybersecurity",
            "enrollmentDate": "2023-09-10",
            "gpa": 3.5
        }),
        json!({
            "name": "Emily Davis",
            "email": "emily.davis@example.com",
            "course": "Web Development",
            "enrollmentDate": "2023-07-15",
            "gpa": 3.9
        }),
        json!({
            "name": "David Wilson",
            "email": "david.wilson@example.com",
            "course": "Network Engineering",
            "enrollmentDate": "2023-08-05",
            "gpa": 3.4
        }),
    ]
}

/// Seed the students collection if it is empty; no-op otherwise.
///
/// Every seeded record is tagged with `addedBy` = `actor_id`, or
/// `"system"` when none is given.
#[instrument(skip(store))]
pub async fn check_and_seed(
    store: &dyn DocumentStore,
    collection: &str,
    actor_id: Option<&str>,
) -> Result<SeedOutcome, AppError> {
    let existing = store.scan(collection).await.map_err(AppError::store)?;
    if !existing.is_empty() {
        info!(
            existing = existing.len(),
            "collection already has students, skipping seed"
        );
        return Ok(SeedOutcome::AlreadySeeded {
            existing: existing.len(),
        });
    }

    let actor = actor_id.unwrap_or(SYSTEM_ACTOR);
    let mut added = 0;
    for mut record in sample_students() {
        if let Value::Object(map) = &mut record {
            map.insert("addedBy".to_string(), json!(actor));
        }
        store
            .insert(collection, record)
            .await
            .map_err(AppError::store)?;
        added += 1;
    }

    info!(count = added, actor, "collection seeded");
    Ok(SeedOutcome::Seeded { count: added })
}
