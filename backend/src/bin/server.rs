//! Sleep Monitor HTTP Server Binary
//!
//! This is the main entry point for the dashboard REST API server.
//! It initializes the repository, warms up the dashboard pages, sets up the
//! HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with local (in-memory) repository (default)
//! LOCAL_SEED_PATH=backend/data/seed.json \
//!   cargo run --bin sleep-monitor-server
//!
//! # Run against Firestore
//! FIRESTORE_PROJECT_ID=my-project FIRESTORE_API_KEY=... \
//!   cargo run --bin sleep-monitor-server --features firestore-repo
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: `local` or `firestore`
//! - `LOCAL_SEED_PATH`: JSON seed for the local repository
//! - `FIRESTORE_*`: Firestore connection settings
//! - `TABLE_UTC_OFFSET_HOURS`: Hour offset of table capture times (default: 7)
//! - `RUST_LOG`: Log filter (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use sleep_monitor::db;
use sleep_monitor::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; `log` records from the library are bridged in.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Sleep Monitor HTTP Server");

    let config = db::load_config()?;
    let repository = db::init_repository_with(&config).await?;

    // Create application state and load every page once
    let state = AppState::new(repository, config.display);
    state.views.activate_all().await;
    info!("Dashboard views activated");

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
