//! # Todolist
//!
//! Starts the to-do list backend: loads configuration, creates the database
//! and tables when missing, opens the connection pool, then waits for a
//! shutdown signal and closes the pool.
//!
//! ## Usage
//!
//! ```bash
//! DB_PASSWORD=secret cargo run -p todolist-app
//! ```

use todolist_app::{app::App, config::Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todolist_app=debug,todolist_shared=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Todolist v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    let app = match App::start(config).await {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e);
        }
    };

    tracing::info!("Ready; press Ctrl+C to stop");
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received, exiting...");

    app.shutdown().await;
    Ok(())
}
