//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::routes::{analytics, durations, rows, table};

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        .route("/pages", get(handlers::list_pages))
        .route("/dates/{collection}", get(handlers::get_dates))
        // Dashboard pages
        .route(table::TABLE_PATH, get(handlers::get_table))
        .route(analytics::ANALYTICS_PATH, get(handlers::get_analytics))
        .route(durations::DURATIONS_PATH, get(handlers::get_durations))
        .route(rows::ROWS_PATH, get(handlers::get_rows))
        .route("/{view}/reload", post(handlers::reload_view));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
