/// Persistence gateway for users and tasks
///
/// This module defines the contract every task store implements. The
/// application service talks to storage only through [`TaskStore`].
///
/// # Gateway Contract
///
/// All stores must:
/// 1. Scope every task read and mutation by `(user_id, task_id)` jointly
/// 2. Report "no matching row" as `Ok(false)` / an empty list, never as an error
/// 3. Reject blank task descriptions with `StoreError::Validation`
/// 4. Report a taken user name as `StoreError::DuplicateUser`
/// 5. Report a task for a nonexistent user as `StoreError::Referential`
///
/// # Implementations
///
/// - [`MySqlStore`]: the production store, one transaction per mutating call
/// - [`MemoryStore`]: process-local store for tests and demos
///
/// # Example
///
/// ```
/// use todolist_shared::models::CreateTask;
/// use todolist_shared::store::{MemoryStore, TaskStore};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// store.ensure_schema().await?;
///
/// let user_id = store.create_user("alice", "$argon2id$...").await?;
/// let task_id = store.create_task(user_id, &CreateTask::new("Buy milk")).await?;
///
/// assert_eq!(store.list_tasks(user_id).await?[0].id, task_id);
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod mysql;

use async_trait::async_trait;

use crate::db::schema::SchemaError;
use crate::models::{CreateTask, Task, TaskId, UpdateTask, User, UserCredentials, UserId};

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

/// Store error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Caller-supplied data rejected before reaching storage
    #[error("{0}")]
    Validation(String),

    /// User name already taken
    #[error("User '{0}' already exists")]
    DuplicateUser(String),

    /// Row references a user that does not exist
    #[error("Referential integrity violation: {0}")]
    Referential(String),

    /// Any other storage failure (connectivity, syntax, timeout)
    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Message used when a task description is blank
pub const EMPTY_DESCRIPTION: &str = "Task description cannot be empty";

/// Rejects blank descriptions; shared by every store implementation
pub(crate) fn check_description(description: &str) -> StoreResult<()> {
    if description.trim().is_empty() {
        return Err(StoreError::Validation(EMPTY_DESCRIPTION.to_string()));
    }
    Ok(())
}

/// Row-level operations on users and tasks
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Idempotently creates the `users` and `tasks` tables
    async fn ensure_schema(&self) -> Result<(), SchemaError>;

    /// Inserts a user and returns the assigned id
    async fn create_user(&self, name: &str, password_hash: &str) -> StoreResult<UserId>;

    /// Looks up the id and password hash for a user name
    async fn find_user_by_name(&self, name: &str) -> StoreResult<Option<UserCredentials>>;

    /// Looks up a user by id
    async fn find_user_by_id(&self, user_id: UserId) -> StoreResult<Option<User>>;

    /// Inserts a pending task for `user_id` and returns the assigned id
    async fn create_task(&self, user_id: UserId, data: &CreateTask) -> StoreResult<TaskId>;

    /// Lists a user's tasks ordered by id ascending
    async fn list_tasks(&self, user_id: UserId) -> StoreResult<Vec<Task>>;

    /// Number of tasks a user owns
    async fn count_tasks(&self, user_id: UserId) -> StoreResult<i64>;

    /// Deletes a task; `true` iff a row owned by `user_id` was removed
    async fn delete_task(&self, user_id: UserId, task_id: TaskId) -> StoreResult<bool>;

    /// Applies a partial update; `true` iff a row owned by `user_id` matched
    ///
    /// An empty update returns `false` without touching storage.
    async fn update_task(
        &self,
        user_id: UserId,
        task_id: TaskId,
        update: &UpdateTask,
    ) -> StoreResult<bool>;
}
