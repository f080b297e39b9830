mod common;

use chrono::Local;
use common::{draft, failing_repo, memory_repo};
use rosterly_models::students::StudentPatch;

#[tokio::test]
async fn test_create_then_get_returns_equal_fields() {
    let (_store, repo) = memory_repo();

    let mut wanted = draft("Ann Lee", "ann@example.com", "Data Science", 3.5);
    wanted.added_by = Some("u1".to_string());
    wanted.added_by_email = Some("owner@example.com".to_string());

    let created = repo.create(wanted).await.unwrap();
    assert!(!created.id.is_empty());
    assert!(created.created_at.is_some());

    let fetched = repo.get_one(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Ann Lee");
    assert_eq!(fetched.email, "ann@example.com");
    assert_eq!(fetched.course, "Data Science");
    assert_eq!(fetched.gpa, 3.5);
    assert_eq!(fetched.added_by.as_deref(), Some("u1"));
    assert_eq!(fetched.id, created.id);
}

#[tokio::test]
async fn test_enrollment_date_defaults_to_today() {
    let (_store, repo) = memory_repo();

    let created = repo
        .create(draft("Ann Lee", "ann@example.com", "Data Science", 3.5))
        .await
        .unwrap();

    assert_eq!(created.enrollment_date, Local::now().date_naive());
}

#[tokio::test]
async fn test_enrollment_date_kept_when_given() {
    let (_store, repo) = memory_repo();

    let mut wanted = draft("Ann Lee", "ann@example.com", "Data Science", 3.5);
    wanted.enrollment_date = Some("2023-09-01".parse().unwrap());

    let created = repo.create(wanted).await.unwrap();
    assert_eq!(created.enrollment_date.to_string(), "2023-09-01");
}

#[tokio::test]
async fn test_list_all_sorted_by_name() {
    let (_store, repo) = memory_repo();

    for (name, email) in [
        ("Charlie", "c@example.com"),
        ("Alice", "a@example.com"),
        ("Bob", "b@example.com"),
    ] {
        repo.create(draft(name, email, "Math", 3.0)).await.unwrap();
    }

    let students = repo.list_all().await;
    let names: Vec<&str> = students.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Charlie"]);
}

#[tokio::test]
async fn test_list_by_course_filters_and_sorts() {
    let (_store, repo) = memory_repo();

    repo.create(draft("zoe", "z@example.com", "CS", 3.1)).await.unwrap();
    repo.create(draft("Adam", "ad@example.com", "CS", 3.2)).await.unwrap();
    repo.create(draft("bella", "b@example.com", "CS", 3.3)).await.unwrap();
    repo.create(draft("Carl", "c@example.com", "Math", 3.4)).await.unwrap();

    let students = repo.list_by_course("CS").await;
    assert!(students.iter().all(|s| s.course == "CS"));

    // Locale-style ordering ignores case, unlike the store's byte order.
    let names: Vec<&str> = students.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Adam", "bella", "zoe"]);
}

#[tokio::test]
async fn test_get_one_distinguishes_missing_from_error() {
    let (_store, repo) = memory_repo();
    assert!(repo.get_one("no-such-id").await.unwrap().is_none());

    let repo = failing_repo();
    assert!(repo.get_one("no-such-id").await.is_err());
}

#[tokio::test]
async fn test_update_merges_fields() {
    let (_store, repo) = memory_repo();

    let created = repo
        .create(draft("Ann Lee", "ann@example.com", "Data Science", 3.5))
        .await
        .unwrap();

    let patch = StudentPatch {
        gpa: Some(3.9),
        ..Default::default()
    };
    repo.update(&created.id, patch).await.unwrap();

    let fetched = repo.get_one(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched.gpa, 3.9);
    assert_eq!(fetched.name, "Ann Lee");
    assert!(fetched.updated_at.is_some());
}

#[tokio::test]
async fn test_update_missing_student_fails() {
    let (_store, repo) = memory_repo();
    let err = repo
        .update("no-such-id", StudentPatch::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_removes_record() {
    let (_store, repo) = memory_repo();

    let created = repo
        .create(draft("Ann Lee", "ann@example.com", "Data Science", 3.5))
        .await
        .unwrap();
    repo.delete(&created.id).await.unwrap();

    assert!(repo.get_one(&created.id).await.unwrap().is_none());
    assert!(repo.delete(&created.id).await.is_err());
}

#[tokio::test]
async fn test_courses_have_all_sentinel_first_exactly_once() {
    let (_store, repo) = memory_repo();

    let courses = repo.list_available_courses().await;
    assert_eq!(courses, vec!["All".to_string()]);

    repo.create(draft("Ann", "a@example.com", "CS", 3.0)).await.unwrap();
    repo.create(draft("Ben", "b@example.com", "CS", 3.1)).await.unwrap();
    repo.create(draft("Cal", "c@example.com", "Math", 3.2)).await.unwrap();

    let courses = repo.list_available_courses().await;
    assert_eq!(courses[0], "All");
    assert_eq!(courses.iter().filter(|c| *c == "All").count(), 1);
    assert_eq!(courses.len(), 3);
    assert!(courses.contains(&"CS".to_string()));
    assert!(courses.contains(&"Math".to_string()));
}

#[tokio::test]
async fn test_reads_fail_soft() {
    let repo = failing_repo();

    assert!(repo.list_all().await.is_empty());
    assert!(repo.list_by_course("CS").await.is_empty());
    assert_eq!(repo.list_available_courses().await, vec!["All".to_string()]);
}

#[tokio::test]
async fn test_writes_fail_loud() {
    let repo = failing_repo();

    let err = repo
        .create(draft("Ann Lee", "ann@example.com", "Data Science", 3.5))
        .await
        .unwrap_err();
    assert_eq!(err.kind, rosterly::ErrorKind::Store);

    assert!(repo.update("id", StudentPatch::default()).await.is_err());
    assert!(repo.delete("id").await.is_err());
}
