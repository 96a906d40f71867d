/// Application bootstrap
///
/// Brings up everything the presentation layer needs: the database, the
/// schema, the connection pool and a [`TodoService`] bound to them.
///
/// # Example
///
/// ```no_run
/// use todolist_app::{app::App, config::Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let app = App::start(Config::from_env()?).await?;
///
/// let outcome = app.service().register("alice", "correct horse").await;
/// println!("{}", outcome);
///
/// app.shutdown().await;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, service::TodoService};
use sqlx::mysql::MySqlPool;
use todolist_shared::db::{
    pool::{close_pool, create_pool},
    schema::ensure_database_exists,
};
use todolist_shared::store::{MySqlStore, TaskStore};
use tracing::info;

/// A started application: pool plus service
pub struct App {
    pool: MySqlPool,
    service: TodoService<MySqlStore>,
}

impl App {
    /// Starts the application
    ///
    /// Creates the database and tables if needed, then opens the pool. Any
    /// schema failure is fatal and returned to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable, the database name is
    /// invalid, or a DDL statement fails
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        ensure_database_exists(&config.database).await?;

        let pool = create_pool(&config.database).await?;
        let store = MySqlStore::new(pool.clone());
        store.ensure_schema().await?;

        let span = tracing::info_span!("todo_service", database = %config.database.database);
        let service = TodoService::new(store, span);

        info!("Application started");
        Ok(Self { pool, service })
    }

    /// The service the presentation layer calls
    pub fn service(&self) -> &TodoService<MySqlStore> {
        &self.service
    }

    /// Releases every database connection
    pub async fn shutdown(self) {
        let Self { pool, service } = self;
        drop(service);
        close_pool(pool).await;
    }
}
