//! Payroll ledger server binary.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use payroll_ledger::api::{AppState, create_router};
use payroll_ledger::config::ConfigLoader;
use payroll_ledger::store::SqliteStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ConfigLoader::from_env()?.into_config();

    let store = SqliteStore::open(&config.storage.database_path)?;
    store.seed_departments(&config.storage.seed_departments)?;

    let bind_addr = config.server.bind_addr.clone();
    info!(
        database = %config.storage.database_path.display(),
        export = %config.export.path().display(),
        "Payroll ledger configured"
    );

    let state = AppState::new(config, Arc::new(store));
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "Listening");
    axum::serve(listener, router).await?;

    Ok(())
}
