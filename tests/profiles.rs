mod common;

use std::sync::Arc;

use common::{FailingStore, STUDENTS, USERS, draft, memory_repo};
use rosterly::ProfileService;
use rosterly_auth::Identity;
use rosterly_models::users::{ProfilePatch, Role};
use rosterly_store::{DocumentStore, MemoryStore};

fn identity(uid: &str) -> Identity {
    Identity {
        uid: uid.to_string(),
        email: format!("{}@example.com", uid),
        display_name: Some("Ann Lee".to_string()),
        photo_url: Some("https://example.com/ann.png".to_string()),
    }
}

fn service(store: Arc<MemoryStore>) -> ProfileService {
    ProfileService::new(store, USERS, STUDENTS)
}

#[tokio::test]
async fn test_profile_created_lazily_from_identity() {
    let store = Arc::new(MemoryStore::new());
    let profiles = service(store.clone());

    let profile = profiles.get_or_create(&identity("u1")).await.unwrap();
    assert_eq!(profile.display_name, "Ann Lee");
    assert_eq!(profile.email, "u1@example.com");
    assert_eq!(profile.role, Role::User);
    assert!(profile.last_login.is_some());

    // Second view reads the stored document instead of recreating it.
    let again = profiles.get_or_create(&identity("u1")).await.unwrap();
    assert_eq!(again.email, profile.email);
    assert_eq!(store.scan(USERS).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_profile_update_merges_editable_fields() {
    let store = Arc::new(MemoryStore::new());
    let profiles = service(store.clone());

    profiles.get_or_create(&identity("u1")).await.unwrap();
    profiles
        .update(
            "u1",
            ProfilePatch {
                bio: Some("Keeps the roster honest".to_string()),
                department: Some("Registrar".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let profile = profiles.get_or_create(&identity("u1")).await.unwrap();
    assert_eq!(profile.bio.as_deref(), Some("Keeps the roster honest"));
    assert_eq!(profile.department.as_deref(), Some("Registrar"));
    assert_eq!(profile.display_name, "Ann Lee");
    assert!(profile.updated_at.is_some());
}

#[tokio::test]
async fn test_update_without_profile_fails() {
    let store = Arc::new(MemoryStore::new());
    let profiles = service(store);

    let err = profiles
        .update("ghost", ProfilePatch::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_students_added_counts_only_own_records() {
    let (store, repo) = memory_repo();
    let profiles = service(store);

    for (name, email, owner) in [
        ("Ann", "a@example.com", "u1"),
        ("Ben", "b@example.com", "u1"),
        ("Cal", "c@example.com", "u2"),
    ] {
        let mut record = draft(name, email, "CS", 3.0);
        record.added_by = Some(owner.to_string());
        repo.create(record).await.unwrap();
    }

    assert_eq!(profiles.students_added("u1").await.unwrap(), 2);
    assert_eq!(profiles.students_added("u2").await.unwrap(), 1);
    assert_eq!(profiles.students_added("u3").await.unwrap(), 0);
}

#[tokio::test]
async fn test_profile_reads_propagate_store_failure() {
    let profiles = ProfileService::new(Arc::new(FailingStore), USERS, STUDENTS);

    assert!(profiles.get_or_create(&identity("u1")).await.is_err());
    assert!(profiles.students_added("u1").await.is_err());
}
