//! # Todolist Application Library
//!
//! The application layer of the to-do list: everything a front end calls.
//!
//! ## Modules
//!
//! - `app`: Startup (database, schema, pool) and shutdown
//! - `config`: Configuration management
//! - `outcome`: Success / Info / Error results handed to the front end
//! - `service`: Registration, login and task operations
//! - `validation`: Input checks applied before anything reaches the store

pub mod app;
pub mod config;
pub mod outcome;
pub mod service;
pub mod validation;

pub use outcome::{Outcome, OutcomeKind};
pub use service::TodoService;
pub use validation::TaskChanges;
