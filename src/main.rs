//! Lokerbot - conversational job board engine
//!
//! A Rust backend that turns a chat channel into a structured job board:
//! per-sender sessions drive registration, job browsing, CV applications
//! and posting management.

mod api;
mod config;
mod db;
mod engine;
mod identity;
mod router;
mod session;
mod transport;
mod validation;

use api::{create_router, AppState};
use db::Database;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lokerbot=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = config::Config::from_env();

    // Ensure database and upload directories exist
    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::create_dir_all(&config.upload_dir)?;

    tracing::info!(path = %config.db_path.display(), "Opening database");
    let database = Database::open(&config.db_path)?;

    let sessions = Arc::new(session::SessionStore::new(config.session_ttl));
    let files: Arc<dyn transport::FileStore> =
        Arc::new(transport::LocalFileStore::new(config.upload_dir.clone()));
    let gateway: Arc<dyn transport::ChatTransport> =
        Arc::new(transport::HttpGatewayTransport::new(config.gateway_url.clone()));
    tracing::info!(gateway = %config.gateway_url, "Chat gateway configured");

    let flow_router = Arc::new(router::FlowRouter::new(
        database,
        Arc::clone(&sessions),
        files,
    ));
    // Idle workers retire on the same clock as their sessions.
    let engine = Arc::new(
        engine::Engine::new(flow_router, gateway).with_idle_timeout(config.session_ttl),
    );
    engine::spawn_session_sweeper(Arc::clone(&sessions), Duration::from_secs(60));

    let app = create_router(AppState { engine });
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Lokerbot listening");
    axum::serve(listener, app).await?;
    Ok(())
}
