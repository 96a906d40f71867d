//! Shared store contract checks
//!
//! Every `TaskStore` implementation must pass the same checks; each test file
//! builds its own store and runs these against it. User names carry a unique
//! suffix so the checks can run against a shared, non-empty database.

#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use todolist_shared::models::{CreateTask, TaskStatus, UpdateTask};
use todolist_shared::store::{StoreError, TaskStore};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Returns a user name that no other test run will have used
pub fn unique_name(prefix: &str) -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let stamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{}_{}_{}", prefix, stamp, n)
}

pub async fn duplicate_user_is_rejected<S: TaskStore>(store: &S) {
    let name = unique_name("dup");

    let id = store.create_user(&name, "hash-1").await.expect("first insert");
    assert!(id > 0);

    match store.create_user(&name, "hash-2").await {
        Err(StoreError::DuplicateUser(conflict)) => assert_eq!(conflict, name),
        other => panic!("expected DuplicateUser, got {:?}", other),
    }

    let creds = store.find_user_by_name(&name).await.unwrap().unwrap();
    assert_eq!(creds.id, id);
    assert_eq!(creds.password_hash, "hash-1");
}

pub async fn unknown_user_lookup_is_none<S: TaskStore>(store: &S) {
    let found = store.find_user_by_name(&unique_name("ghost")).await.unwrap();
    assert!(found.is_none());
}

pub async fn user_names_are_case_sensitive<S: TaskStore>(store: &S) {
    let lower = unique_name("case");
    let upper = lower.to_uppercase();

    let lower_id = store.create_user(&lower, "hash-lower").await.unwrap();
    let upper_id = store.create_user(&upper, "hash-upper").await.expect("distinct name");
    assert_ne!(lower_id, upper_id);

    let creds = store.find_user_by_name(&upper).await.unwrap().unwrap();
    assert_eq!(creds.id, upper_id);
    assert_eq!(creds.password_hash, "hash-upper");
}

pub async fn user_found_by_id<S: TaskStore>(store: &S) {
    let name = unique_name("byid");
    let id = store.create_user(&name, "hash").await.unwrap();

    let user = store.find_user_by_id(id).await.unwrap().expect("user by id");
    assert_eq!(user.id, id);
    assert_eq!(user.name, name);

    assert!(store.find_user_by_id(-1).await.unwrap().is_none());
}

pub async fn task_round_trip<S: TaskStore>(store: &S) {
    let user_id = store.create_user(&unique_name("rt"), "hash").await.unwrap();
    let due = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

    assert!(store.list_tasks(user_id).await.unwrap().is_empty());

    let task_id = store
        .create_task(
            user_id,
            &CreateTask {
                description: "Buy milk".to_string(),
                due_date: Some(due),
                priority: Some(5),
            },
        )
        .await
        .unwrap();

    let tasks = store.list_tasks(user_id).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, task_id);
    assert_eq!(tasks[0].description, "Buy milk");
    assert_eq!(tasks[0].status, TaskStatus::Pending);
    assert_eq!(tasks[0].due_date, Some(due));
    assert_eq!(tasks[0].priority, Some(5));
}

pub async fn tasks_listed_in_id_order<S: TaskStore>(store: &S) {
    let user_id = store.create_user(&unique_name("order"), "hash").await.unwrap();

    let mut ids = Vec::new();
    for description in ["first", "second", "third"] {
        ids.push(store.create_task(user_id, &CreateTask::new(description)).await.unwrap());
    }

    let listed: Vec<_> = store.list_tasks(user_id).await.unwrap().iter().map(|t| t.id).collect();
    assert_eq!(listed, ids);
    assert_eq!(store.count_tasks(user_id).await.unwrap(), 3);
}

pub async fn blank_description_is_rejected<S: TaskStore>(store: &S) {
    let user_id = store.create_user(&unique_name("blank"), "hash").await.unwrap();

    let err = store.create_task(user_id, &CreateTask::new("   ")).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.count_tasks(user_id).await.unwrap(), 0);
}

pub async fn task_for_missing_user_is_referential<S: TaskStore>(store: &S) {
    let err = store
        .create_task(i64::MAX - 1, &CreateTask::new("orphan"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Referential(_)), "got {:?}", err);
}

pub async fn mutations_are_owner_scoped<S: TaskStore>(store: &S) {
    let owner = store.create_user(&unique_name("owner"), "hash").await.unwrap();
    let other = store.create_user(&unique_name("other"), "hash").await.unwrap();
    let task_id = store.create_task(owner, &CreateTask::new("private")).await.unwrap();

    assert!(store.list_tasks(other).await.unwrap().is_empty());
    assert!(!store.delete_task(other, task_id).await.unwrap());

    let update = UpdateTask {
        description: Some("hijacked".to_string()),
        ..Default::default()
    };
    assert!(!store.update_task(other, task_id, &update).await.unwrap());

    let tasks = store.list_tasks(owner).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].description, "private");
}

pub async fn partial_update_changes_only_present_fields<S: TaskStore>(store: &S) {
    let user_id = store.create_user(&unique_name("upd"), "hash").await.unwrap();
    let due = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let task_id = store
        .create_task(
            user_id,
            &CreateTask {
                description: "Write report".to_string(),
                due_date: Some(due),
                priority: Some(3),
            },
        )
        .await
        .unwrap();

    let update = UpdateTask {
        status: Some(TaskStatus::Completed),
        ..Default::default()
    };
    assert!(store.update_task(user_id, task_id, &update).await.unwrap());

    let task = &store.list_tasks(user_id).await.unwrap()[0];
    assert_eq!(task.status, TaskStatus::Completed);
    assert_eq!(task.description, "Write report");
    assert_eq!(task.due_date, Some(due));
    assert_eq!(task.priority, Some(3));

    // Back to pending is allowed
    let update = UpdateTask {
        status: Some(TaskStatus::Pending),
        priority: Some(10),
        ..Default::default()
    };
    assert!(store.update_task(user_id, task_id, &update).await.unwrap());

    let task = &store.list_tasks(user_id).await.unwrap()[0];
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.priority, Some(10));

    // No fields: nothing happens
    assert!(!store.update_task(user_id, task_id, &UpdateTask::default()).await.unwrap());
}

pub async fn delete_reports_whether_a_row_went<S: TaskStore>(store: &S) {
    let user_id = store.create_user(&unique_name("del"), "hash").await.unwrap();
    let task_id = store.create_task(user_id, &CreateTask::new("temporary")).await.unwrap();

    assert!(store.delete_task(user_id, task_id).await.unwrap());
    assert!(!store.delete_task(user_id, task_id).await.unwrap());
    assert_eq!(store.count_tasks(user_id).await.unwrap(), 0);
}
