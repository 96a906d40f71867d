/// In-memory task store for testing and demos
///
/// Mirrors the rules the MySQL schema enforces (unique user names, task
/// owner must exist, ascending ids) so service behaviour can be exercised
/// without a database server. State lives behind a `tokio` RwLock and is
/// lost when the store is dropped.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{check_description, StoreError, StoreResult, TaskStore};
use crate::db::schema::SchemaError;
use crate::models::{
    CreateTask, Task, TaskId, TaskStatus, UpdateTask, User, UserCredentials, UserId,
};

#[derive(Debug, Clone)]
struct StoredUser {
    id: UserId,
    name: String,
    password_hash: String,
}

#[derive(Debug, Clone)]
struct StoredTask {
    user_id: UserId,
    task: Task,
}

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<StoredUser>,
    tasks: BTreeMap<TaskId, StoredTask>,
    last_user_id: UserId,
    last_task_id: TaskId,
}

/// Task store kept entirely in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn ensure_schema(&self) -> Result<(), SchemaError> {
        Ok(())
    }

    async fn create_user(&self, name: &str, password_hash: &str) -> StoreResult<UserId> {
        let mut state = self.state.write().await;

        if state.users.iter().any(|u| u.name == name) {
            return Err(StoreError::DuplicateUser(name.to_string()));
        }

        state.last_user_id += 1;
        let id = state.last_user_id;
        state.users.push(StoredUser {
            id,
            name: name.to_string(),
            password_hash: password_hash.to_string(),
        });

        Ok(id)
    }

    async fn find_user_by_name(&self, name: &str) -> StoreResult<Option<UserCredentials>> {
        let state = self.state.read().await;

        Ok(state
            .users
            .iter()
            .find(|u| u.name == name)
            .map(|u| UserCredentials {
                id: u.id,
                password_hash: u.password_hash.clone(),
            }))
    }

    async fn find_user_by_id(&self, user_id: UserId) -> StoreResult<Option<User>> {
        let state = self.state.read().await;

        Ok(state.users.iter().find(|u| u.id == user_id).map(|u| User {
            id: u.id,
            name: u.name.clone(),
        }))
    }

    async fn create_task(&self, user_id: UserId, data: &CreateTask) -> StoreResult<TaskId> {
        check_description(&data.description)?;

        let mut state = self.state.write().await;

        if !state.users.iter().any(|u| u.id == user_id) {
            return Err(StoreError::Referential(format!(
                "user {} does not exist",
                user_id
            )));
        }

        state.last_task_id += 1;
        let id = state.last_task_id;
        state.tasks.insert(
            id,
            StoredTask {
                user_id,
                task: Task {
                    id,
                    description: data.description.clone(),
                    status: TaskStatus::Pending,
                    due_date: data.due_date,
                    priority: data.priority,
                    created_at: Utc::now(),
                },
            },
        );

        Ok(id)
    }

    async fn list_tasks(&self, user_id: UserId) -> StoreResult<Vec<Task>> {
        let state = self.state.read().await;

        // BTreeMap iteration is already ordered by id
        Ok(state
            .tasks
            .values()
            .filter(|t| t.user_id == user_id)
            .map(|t| t.task.clone())
            .collect())
    }

    async fn count_tasks(&self, user_id: UserId) -> StoreResult<i64> {
        let state = self.state.read().await;

        Ok(state.tasks.values().filter(|t| t.user_id == user_id).count() as i64)
    }

    async fn delete_task(&self, user_id: UserId, task_id: TaskId) -> StoreResult<bool> {
        let mut state = self.state.write().await;

        let owned = matches!(state.tasks.get(&task_id), Some(t) if t.user_id == user_id);
        if owned {
            state.tasks.remove(&task_id);
        }

        Ok(owned)
    }

    async fn update_task(
        &self,
        user_id: UserId,
        task_id: TaskId,
        update: &UpdateTask,
    ) -> StoreResult<bool> {
        if update.is_empty() {
            return Ok(false);
        }
        if let Some(description) = &update.description {
            check_description(description)?;
        }

        let mut state = self.state.write().await;

        match state.tasks.get_mut(&task_id) {
            Some(stored) if stored.user_id == user_id => {
                update.apply_to(&mut stored.task);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_are_assigned_ascending() {
        let store = MemoryStore::new();
        let alice = store.create_user("alice", "hash").await.unwrap();
        let bob = store.create_user("bob", "hash").await.unwrap();
        assert!(bob > alice);

        let first = store.create_task(alice, &CreateTask::new("one")).await.unwrap();
        let second = store.create_task(bob, &CreateTask::new("two")).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_find_user_by_id() {
        let store = MemoryStore::new();
        let id = store.create_user("alice", "hash").await.unwrap();

        let user = store.find_user_by_id(id).await.unwrap().unwrap();
        assert_eq!(user.name, "alice");
        assert!(store.find_user_by_id(id + 100).await.unwrap().is_none());
    }
}
