/// Database and table bootstrap
///
/// Everything here is idempotent: running it against an already initialised
/// server is a no-op. Any other DDL failure is fatal to startup.

use sqlx::mysql::MySqlPool;
use sqlx::{ConnectOptions, Connection, Executor};
use tracing::{debug, info};

use super::pool::DatabaseConfig;

/// DDL for the `users` table
pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(100) COLLATE utf8mb4_bin NOT NULL UNIQUE,
    password VARCHAR(255) NOT NULL
) ENGINE = InnoDB
"#;

/// DDL for the `tasks` table
pub const CREATE_TASKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    user_id BIGINT NOT NULL,
    task VARCHAR(255) NOT NULL,
    task_status ENUM('pending', 'completed') NOT NULL DEFAULT 'pending',
    due_date DATE NULL,
    priority INT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    INDEX idx_tasks_user (user_id),
    CONSTRAINT fk_tasks_user FOREIGN KEY (user_id)
        REFERENCES users (id) ON DELETE CASCADE
) ENGINE = InnoDB
"#;

/// Fatal schema bootstrap failure
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Database name cannot be used as an identifier
    #[error("Invalid database name '{0}': use 1-64 ASCII letters, digits or underscores")]
    InvalidDatabaseName(String),

    /// DDL statement failed
    #[error("Schema setup failed: {0}")]
    Ddl(#[from] sqlx::Error),
}

/// Checks that a database name is safe to splice into DDL
///
/// Identifiers cannot be bound as statement parameters, so only a
/// conservative character set is accepted.
pub fn validate_database_name(name: &str) -> Result<(), SchemaError> {
    let valid = !name.is_empty()
        && name.len() <= 64
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(SchemaError::InvalidDatabaseName(name.to_string()))
    }
}

/// Creates the configured database if it doesn't exist
///
/// Connects to the server without selecting a database, so this can run
/// before the pool is created.
///
/// # Errors
///
/// Returns `SchemaError::InvalidDatabaseName` for an unusable name and
/// `SchemaError::Ddl` if the server is unreachable or refuses the statement
pub async fn ensure_database_exists(config: &DatabaseConfig) -> Result<(), SchemaError> {
    validate_database_name(&config.database)?;

    info!(database = %config.database, "Ensuring database exists");

    let mut conn = config.server_options().connect().await?;
    let statement = format!(
        "CREATE DATABASE IF NOT EXISTS `{}` CHARACTER SET utf8mb4",
        config.database
    );
    conn.execute(statement.as_str()).await?;
    conn.close().await?;

    debug!(database = %config.database, "Database present");
    Ok(())
}

/// Creates the `users` and `tasks` tables if they are absent
///
/// # Errors
///
/// Returns `SchemaError::Ddl` if either statement fails
pub async fn create_tables(pool: &MySqlPool) -> Result<(), SchemaError> {
    pool.execute(CREATE_USERS_TABLE).await?;
    debug!("users table present");

    pool.execute(CREATE_TASKS_TABLE).await?;
    debug!("tasks table present");

    info!("Database schema is up to date");
    Ok(())
}
