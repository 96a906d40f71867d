/// Configuration management for the application
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `DB_HOST`: MySQL host (default: 127.0.0.1)
/// - `DB_PORT`: MySQL port (default: 3306)
/// - `DB_USER`: MySQL user (default: root)
/// - `DB_PASSWORD`: MySQL password (default: empty)
/// - `DB_NAME`: Database name (default: todolist)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
/// - `RUST_LOG`: Log filter (default: todolist_app=debug,todolist_shared=info)
///
/// # Example
///
/// ```no_run
/// use todolist_app::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Using database {} on {}", config.database.database, config.database.host);
/// # Ok(())
/// # }
/// ```

use std::env;
use todolist_shared::db::pool::DatabaseConfig;

/// Complete application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Database connection and pool settings
    pub database: DatabaseConfig,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// A `.env` file in the working directory is honoured when present.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable has an invalid value
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup
    ///
    /// Unset variables fall back to their documented defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable has an invalid value
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DatabaseConfig::default();

        let port = match lookup("DB_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("DB_PORT must be a port number: {}", e))?,
            None => defaults.port,
        };

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse::<u32>().map_err(|e| {
                anyhow::anyhow!("DATABASE_MAX_CONNECTIONS must be a positive integer: {}", e)
            })?,
            None => defaults.max_connections,
        };

        if max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        let database = DatabaseConfig {
            host: lookup("DB_HOST").unwrap_or_else(|| defaults.host.clone()),
            port,
            username: lookup("DB_USER").unwrap_or_else(|| defaults.username.clone()),
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            database: lookup("DB_NAME").unwrap_or_else(|| defaults.database.clone()),
            max_connections,
            min_connections: defaults.min_connections.min(max_connections),
            ..defaults
        };

        Ok(Self { database })
    }
}
