//! Rev-n-Roll API server binary.
//!
//! Startup order:
//!
//! 1. Load settings (optional file path as the first argument)
//! 2. Initialize structured logging
//! 3. Connect to `PostgreSQL` and apply migrations
//! 4. Serve the REST API until `Ctrl-C`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use revnroll_api::{AppState, Settings, start_server};
use revnroll_db::PostgresPool;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the database connection, migrations
/// or the HTTP server fail.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration.
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::load(config_path.as_deref()).context("loading settings")?;

    // 2. Initialize structured logging. RUST_LOG wins over the config file.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter)),
        )
        .with_target(true)
        .init();

    info!(
        host = %settings.server.host,
        port = settings.server.port,
        "revnroll-server starting"
    );

    // 3. Connect to PostgreSQL.
    let pool = PostgresPool::connect(&settings.database.to_postgres_config())
        .await
        .context("connecting to PostgreSQL")?;

    if settings.database.run_migrations {
        pool.run_migrations()
            .await
            .context("running database migrations")?;
        info!("Database migrations applied");
    }

    // 4. Serve.
    let state = Arc::new(AppState::postgres(pool.clone()));
    let result = start_server(&settings.server, state).await;

    pool.close().await;
    result.context("serving HTTP")?;

    info!("revnroll-server shut down");
    Ok(())
}
