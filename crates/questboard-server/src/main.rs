use anyhow::Result;
use questboard_core::{SqliteStore, StoreOptions};
use questboard_server::{build_router, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = questboard_config::load_from_env()?;
    ensure_database_parent(config.database.path.as_str())?;
    let store = SqliteStore::open_with(
        config.database.path.as_str(),
        StoreOptions {
            busy_timeout_ms: config.database.busy_timeout_ms,
            wal_enabled: config.database.wal_enabled,
        },
    )?;
    let state = AppState::new(store);
    let app = build_router(state);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "questboard listening");
    tracing::info!(path = %config.database.path, "database opened");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}

fn ensure_database_parent(database_path: &str) -> Result<()> {
    if let Some(parent) = std::path::Path::new(database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
