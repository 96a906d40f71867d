/// MySQL implementation of the task store
///
/// Each mutating call is one unit of work: a transaction is begun on entry,
/// committed on success, and rolled back when the guard is dropped on any
/// early return. Reads go straight to the pool, which checks a connection
/// out for the duration of the query and returns it afterwards.
///
/// # Example
///
/// ```no_run
/// use todolist_shared::db::pool::{create_pool, DatabaseConfig};
/// use todolist_shared::store::{MySqlStore, TaskStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(&DatabaseConfig::default()).await?;
/// let store = MySqlStore::new(pool);
///
/// store.ensure_schema().await?;
/// let user_id = store.create_user("alice", "$argon2id$...").await?;
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use sqlx::mysql::{MySql, MySqlPool};
use sqlx::Transaction;
use tracing::{debug, warn};

use super::{check_description, StoreError, StoreResult, TaskStore};
use crate::db::schema::{create_tables, SchemaError};
use crate::models::{CreateTask, Task, TaskId, UpdateTask, User, UserCredentials, UserId};

/// Task store backed by a MySQL connection pool
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Wraps an existing pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// The underlying pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Begins a unit of work
    ///
    /// Dropping the returned transaction without calling `commit` rolls it back.
    async fn begin(&self) -> StoreResult<Transaction<'static, MySql>> {
        let tx = self.pool.begin().await?;
        debug!("Transaction started");
        Ok(tx)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

#[async_trait]
impl TaskStore for MySqlStore {
    async fn ensure_schema(&self) -> Result<(), SchemaError> {
        create_tables(&self.pool).await
    }

    async fn create_user(&self, name: &str, password_hash: &str) -> StoreResult<UserId> {
        let mut tx = self.begin().await?;

        let result = sqlx::query("INSERT INTO users (name, password) VALUES (?, ?)")
            .bind(name)
            .bind(password_hash)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::DuplicateUser(name.to_string())
                } else {
                    StoreError::Persistence(e)
                }
            })?;

        tx.commit().await?;

        let user_id = result.last_insert_id() as UserId;
        debug!(user_id, "User row inserted");
        Ok(user_id)
    }

    async fn find_user_by_name(&self, name: &str) -> StoreResult<Option<UserCredentials>> {
        let creds = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, password FROM users WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(creds)
    }

    async fn find_user_by_id(&self, user_id: UserId) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, name FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn create_task(&self, user_id: UserId, data: &CreateTask) -> StoreResult<TaskId> {
        check_description(&data.description)?;

        let mut tx = self.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO tasks (user_id, task, due_date, priority)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(&data.description)
        .bind(data.due_date)
        .bind(data.priority)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                warn!(user_id, "Task insert rejected: user does not exist");
                StoreError::Referential(format!("user {} does not exist", user_id))
            } else {
                StoreError::Persistence(e)
            }
        })?;

        tx.commit().await?;

        let task_id = result.last_insert_id() as TaskId;
        debug!(user_id, task_id, "Task row inserted");
        Ok(task_id)
    }

    async fn list_tasks(&self, user_id: UserId) -> StoreResult<Vec<Task>> {
        // ENUM columns are read back as plain strings
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, task, CAST(task_status AS CHAR) AS task_status,
                   due_date, priority, created_at
            FROM tasks
            WHERE user_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn count_tasks(&self, user_id: UserId) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn delete_task(&self, user_id: UserId, task_id: TaskId) -> StoreResult<bool> {
        let mut tx = self.begin().await?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(task_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
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

        let mut tx = self.begin().await?;

        // Absent fields bind NULL and keep the current column value
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET task = COALESCE(?, task),
                due_date = COALESCE(?, due_date),
                priority = COALESCE(?, priority),
                task_status = COALESCE(?, task_status)
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(update.description.as_deref())
        .bind(update.due_date)
        .bind(update.priority)
        .bind(update.status.map(|s| s.as_str()))
        .bind(task_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
