//! # Todolist Shared Library
//!
//! This crate contains the persistence layer used by the to-do list
//! application: entity models, the task store gateway, database bootstrap
//! and password hashing.
//!
//! ## Module Organization
//!
//! - `models`: User and task records and their input types
//! - `store`: The `TaskStore` gateway trait and its MySQL / in-memory implementations
//! - `db`: Connection pool management and schema bootstrap
//! - `auth`: Password hashing and verification

pub mod auth;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the todolist shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
