/// Task model
///
/// A task belongs to exactly one user. Every read and mutation goes through
/// the gateway scoped by `(user_id, task_id)`; a task id on its own never
/// identifies a row.
///
/// # Status
///
/// ```text
/// pending ⇄ completed
/// ```
///
/// Transitions are caller-directed and may go either way.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
///     user_id BIGINT NOT NULL,
///     task VARCHAR(255) NOT NULL,
///     task_status ENUM('pending', 'completed') NOT NULL DEFAULT 'pending',
///     due_date DATE NULL,
///     priority INT NULL,
///     created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
///     FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
/// );
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric task identifier, assigned by the store on creation
pub type TaskId = i64;

/// Completion state of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not done yet (the default for new tasks)
    #[default]
    Pending,

    /// Done
    Completed,
}

impl TaskStatus {
    /// Converts status to the string stored in the `task_status` column
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known task status
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown task status '{0}' (expected 'pending' or 'completed')")]
pub struct ParseStatusError(pub String);

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "completed" => Ok(TaskStatus::Completed),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = ParseStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A task as listed back to its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: TaskId,

    /// Task description
    #[sqlx(rename = "task")]
    pub description: String,

    /// Current status
    #[sqlx(rename = "task_status", try_from = "String")]
    pub status: TaskStatus,

    /// Optional due date
    pub due_date: Option<NaiveDate>,

    /// Optional priority, 0 through 10
    pub priority: Option<i32>,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// Values are expected to be validated already; the gateway only re-checks
/// that the description is not blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTask {
    /// Task description
    pub description: String,

    /// Optional due date
    pub due_date: Option<NaiveDate>,

    /// Optional priority
    pub priority: Option<i32>,
}

impl CreateTask {
    /// Creates input with just a description
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }
}

/// Partial update of a task
///
/// Only `Some` fields are written; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTask {
    /// New description
    pub description: Option<String>,

    /// New due date
    pub due_date: Option<NaiveDate>,

    /// New priority
    pub priority: Option<i32>,

    /// New status
    pub status: Option<TaskStatus>,
}

impl UpdateTask {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }

    /// Applies the present fields to an in-memory task
    pub(crate) fn apply_to(&self, task: &mut Task) {
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(priority) = self.priority {
            task.priority = Some(priority);
        }
        if let Some(status) = self.status {
            task.status = status;
        }
    }
}
