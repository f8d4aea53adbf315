use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use models::db::{self, DatabaseConfig};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{routes, state::AppState};

/// Connect the pool and bring the schema up to date when configured to.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let db = db::connect_with_config(&DatabaseConfig::from(&cfg.database)).await?;
    if cfg.database.run_migrations {
        db::migrate(&db).await?;
    } else {
        warn!("database.run_migrations is off; assuming schema is current");
    }
    Ok(AppState { db })
}

pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, routes::default_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Public entry: build the app and run the HTTP server until ctrl-c
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app = build_app(state);

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "customer service listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}
