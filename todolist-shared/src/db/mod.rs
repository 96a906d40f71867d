/// Database layer for the to-do list
///
/// # Modules
///
/// - `pool`: MySQL connection pool management with health checks
/// - `schema`: Database and table bootstrap
///
/// # Example
///
/// ```no_run
/// use todolist_shared::db::pool::{create_pool, DatabaseConfig};
/// use todolist_shared::db::schema::ensure_database_exists;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig::default();
///
///     ensure_database_exists(&config).await?;
///     let pool = create_pool(&config).await?;
///     Ok(())
/// }
/// ```

pub mod pool;
pub mod schema;
