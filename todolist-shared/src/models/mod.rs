/// Entity models for the to-do list
///
/// # Models
///
/// - `user`: Registered accounts and their stored credentials
/// - `task`: To-do items owned by a single user
///
/// Rows are read and written through the [`crate::store::TaskStore`] gateway;
/// the models themselves carry no database access.

pub mod task;
pub mod user;

pub use task::{CreateTask, Task, TaskId, TaskStatus, UpdateTask};
pub use user::{User, UserCredentials, UserId};
