/// Application service: the only entry point for the presentation layer
///
/// Validates input, checks credentials, delegates to a [`TaskStore`] and maps
/// every result to an [`Outcome`]. Store failures are logged with full detail
/// and surfaced as safe, generic messages.
///
/// # Example
///
/// ```
/// use todolist_app::service::TodoService;
/// use todolist_shared::store::MemoryStore;
///
/// # #[tokio::main]
/// # async fn main() {
/// let service = TodoService::new(MemoryStore::new(), tracing::info_span!("todo_service"));
///
/// assert!(service.register("alice", "correct horse").await.is_success());
/// let (user_id, outcome) = service.authenticate("alice", "correct horse").await;
/// assert!(outcome.is_success());
///
/// let added = service.add_task(user_id.unwrap(), "Buy milk", Some("2025-03-01"), Some(5)).await;
/// assert!(added.is_success());
/// # }
/// ```

use std::fmt;
use todolist_shared::auth::password::{
    hash_password, prepare_dummy_hash, verify_dummy_password, verify_password,
};
use todolist_shared::models::{Task, TaskId, User, UserId};
use todolist_shared::store::{StoreError, TaskStore};
use tracing::{debug, error, info, warn, Instrument, Span};

use crate::outcome::Outcome;
use crate::validation::{self, check_credentials_present, check_registration, TaskChanges};

/// Shown for every failed login, whatever the reason
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Shown when a store failure must not leak detail
pub const STORE_FAILURE: &str = "A database error occurred. Please try again later.";

/// Shown for failures outside the known error taxonomy
pub const UNEXPECTED_FAILURE: &str = "An unexpected error occurred. Please try again later.";

/// Shown when the acting user id does not name a user
pub const UNKNOWN_USER: &str = "Your account could not be found. Please log in again.";

pub const TASK_NOT_FOUND: &str = "Task not found";
pub const NO_CHANGES: &str = "No changes to apply";
pub const NO_TASKS: &str = "No tasks found";

/// To-do list operations over a task store
pub struct TodoService<S> {
    store: S,
    span: Span,
}

impl<S: TaskStore> TodoService<S> {
    /// Creates a service over `store`
    ///
    /// Every operation runs inside `span`, so the caller decides where the
    /// service's log events go and what context they carry.
    ///
    /// The dummy hash for unknown-user logins is computed here, so no login
    /// pays for it.
    pub fn new(store: S, span: Span) -> Self {
        if !prepare_dummy_hash() {
            span.in_scope(|| warn!("Dummy password hash unavailable"));
        }
        Self { store, span }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers a new user
    ///
    /// Success carries the new user id.
    pub async fn register(&self, username: &str, password: &str) -> Outcome<UserId> {
        async {
            if let Err(e) = check_registration(username, password) {
                debug!(reason = %e, "Registration rejected");
                return Outcome::error(e.to_string());
            }

            let password_hash = match hash_password(password) {
                Ok(hash) => hash,
                Err(e) => return unexpected("register", &e),
            };

            match self.store.create_user(username.trim(), &password_hash).await {
                Ok(user_id) => {
                    info!(user_id, "User registered");
                    Outcome::success(
                        format!("User '{}' registered successfully", username.trim()),
                        user_id,
                    )
                }
                Err(e) => store_failure("register", e),
            }
        }
        .instrument(self.span.clone())
        .await
    }

    /// Checks a username and password
    ///
    /// Unknown users and wrong passwords produce the same message.
    pub async fn authenticate(&self, username: &str, password: &str) -> (Option<UserId>, Outcome) {
        async {
            if let Err(e) = check_credentials_present(username, password) {
                return (None, Outcome::error(e.to_string()));
            }

            let creds = match self.store.find_user_by_name(username.trim()).await {
                Ok(creds) => creds,
                Err(e) => return (None, store_failure("authenticate", e)),
            };

            let Some(creds) = creds else {
                verify_dummy_password(password);
                debug!("Login failed");
                return (None, Outcome::error(INVALID_CREDENTIALS));
            };

            match verify_password(password, &creds.password_hash) {
                Ok(true) => {
                    info!(user_id = creds.id, "User authenticated");
                    (
                        Some(creds.id),
                        Outcome::success(format!("Welcome, {}!", username.trim()), ()),
                    )
                }
                Ok(false) => {
                    debug!("Login failed");
                    (None, Outcome::error(INVALID_CREDENTIALS))
                }
                Err(e) => (None, unexpected("authenticate", &e)),
            }
        }
        .instrument(self.span.clone())
        .await
    }

    /// Looks up the account behind a logged-in user id
    ///
    /// An id that no longer names a user gives an Error asking for a new login.
    pub async fn current_user(&self, user_id: UserId) -> Outcome<User> {
        async {
            match self.store.find_user_by_id(user_id).await {
                Ok(Some(user)) => Outcome::success(format!("Logged in as {}", user.name), user),
                Ok(None) => {
                    warn!(user_id, "Session names an unknown user");
                    Outcome::error(UNKNOWN_USER)
                }
                Err(e) => store_failure("current_user", e),
            }
        }
        .instrument(self.span.clone())
        .await
    }

    /// Adds a pending task for `user_id`
    ///
    /// Success carries the new task id.
    pub async fn add_task(
        &self,
        user_id: UserId,
        description: &str,
        due_date: Option<&str>,
        priority: Option<i32>,
    ) -> Outcome<TaskId> {
        async {
            let data = match validation::new_task(description, due_date, priority) {
                Ok(data) => data,
                Err(e) => {
                    debug!(user_id, reason = %e, "Task rejected");
                    return Outcome::error(e.to_string());
                }
            };

            match self.store.create_task(user_id, &data).await {
                Ok(task_id) => {
                    info!(user_id, task_id, "Task added");
                    Outcome::success("Task added successfully", task_id)
                }
                Err(e) => store_failure("add_task", e),
            }
        }
        .instrument(self.span.clone())
        .await
    }

    /// Deletes one of the user's tasks
    ///
    /// A task that doesn't exist and a task owned by someone else both give
    /// the same Info outcome.
    pub async fn delete_task(&self, user_id: UserId, task_id: TaskId) -> Outcome {
        async {
            match self.store.delete_task(user_id, task_id).await {
                Ok(true) => {
                    info!(user_id, task_id, "Task deleted");
                    Outcome::success("Task deleted successfully", ())
                }
                Ok(false) => {
                    debug!(user_id, task_id, "Delete matched no task");
                    Outcome::info(TASK_NOT_FOUND)
                }
                Err(e) => store_failure("delete_task", e),
            }
        }
        .instrument(self.span.clone())
        .await
    }

    /// Applies the present fields of `changes` to one of the user's tasks
    pub async fn update_task(
        &self,
        user_id: UserId,
        task_id: TaskId,
        changes: &TaskChanges,
    ) -> Outcome {
        async {
            let update = match validation::task_update(changes) {
                Ok(update) => update,
                Err(e) => {
                    debug!(user_id, task_id, reason = %e, "Update rejected");
                    return Outcome::error(e.to_string());
                }
            };

            if update.is_empty() {
                return Outcome::info(NO_CHANGES);
            }

            match self.store.update_task(user_id, task_id, &update).await {
                Ok(true) => {
                    info!(user_id, task_id, "Task updated");
                    Outcome::success("Task updated successfully", ())
                }
                Ok(false) => {
                    debug!(user_id, task_id, "Update matched no task");
                    Outcome::info(TASK_NOT_FOUND)
                }
                Err(e) => store_failure("update_task", e),
            }
        }
        .instrument(self.span.clone())
        .await
    }

    /// Lists the user's tasks in creation order
    pub async fn list_tasks(&self, user_id: UserId) -> Outcome<Vec<Task>> {
        async {
            match self.store.list_tasks(user_id).await {
                Ok(tasks) if tasks.is_empty() => Outcome::info(NO_TASKS),
                Ok(tasks) => {
                    debug!(user_id, count = tasks.len(), "Tasks listed");
                    Outcome::success(format!("Found {} task(s)", tasks.len()), tasks)
                }
                Err(e) => store_failure("list_tasks", e),
            }
        }
        .instrument(self.span.clone())
        .await
    }
}

/// Maps a store failure to a user-facing error, logging the detail
fn store_failure<T>(operation: &'static str, err: StoreError) -> Outcome<T> {
    match err {
        StoreError::Validation(message) => {
            warn!(operation, reason = %message, "Store rejected input");
            Outcome::error(message)
        }
        StoreError::DuplicateUser(name) => {
            info!(operation, username = %name, "Username already taken");
            Outcome::error(format!("Username '{}' is already taken", name))
        }
        StoreError::Referential(detail) => {
            warn!(operation, detail = %detail, "Referential integrity violation");
            Outcome::error(UNKNOWN_USER)
        }
        StoreError::Persistence(e) => {
            error!(operation, error = %e, "Persistence failure");
            Outcome::error(STORE_FAILURE)
        }
    }
}

/// Handles failures outside the store taxonomy
fn unexpected<T>(operation: &'static str, err: &dyn fmt::Display) -> Outcome<T> {
    error!(severity = "critical", operation, error = %err, "Unexpected failure");
    Outcome::error(UNEXPECTED_FAILURE)
}
