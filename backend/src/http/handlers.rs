//! HTTP handlers for the REST API.
//!
//! Page handlers delegate to the view processors; every page answers with
//! its current [`ViewSnapshot`].

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{
    DateIndexResponse, DateQuery, DurationHistogramData, HealthResponse, PagesResponse,
    RowDistributionData, TableData, TimeSeriesData, ViewName, ViewSnapshot,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{DateSelection, DURATION_COLLECTION, SLEEP_COLLECTION};
use crate::db::services as db_services;
use crate::routes::pages::pages;
use crate::services::view_processor::{ViewKind, ViewProcessor};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        backend: state.repository.backend_name().to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Navigation
// =============================================================================

/// GET /v1/pages
pub async fn list_pages() -> HandlerResult<PagesResponse> {
    Ok(Json(PagesResponse { pages: pages() }))
}

/// GET /v1/dates/{collection}
///
/// Date selector options of `sleep` or `duration`, read fresh from the store.
pub async fn get_dates(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> HandlerResult<DateIndexResponse> {
    if collection != SLEEP_COLLECTION && collection != DURATION_COLLECTION {
        return Err(AppError::NotFound(format!(
            "Unknown collection: {}",
            collection
        )));
    }

    let index = db_services::fetch_date_index(state.repository.as_ref(), &collection).await?;
    Ok(Json(DateIndexResponse {
        collection,
        dates: index.all,
        default: index.default,
    }))
}

// =============================================================================
// Dashboard Pages
// =============================================================================

/// Apply the requested selection, or activate the page and keep its current one.
async fn view_snapshot<K: ViewKind>(
    processor: &ViewProcessor<K>,
    selection: Option<DateSelection>,
) -> ViewSnapshot<K::Output> {
    match selection {
        Some(selection) => processor.select_date(selection).await,
        None => {
            processor.ensure_activated().await;
            processor.snapshot()
        }
    }
}

/// GET /v1/table?date=
pub async fn get_table(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> HandlerResult<ViewSnapshot<TableData>> {
    Ok(Json(
        view_snapshot(&state.views.table, query.selection()).await,
    ))
}

/// GET /v1/analytics?date=
pub async fn get_analytics(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> HandlerResult<ViewSnapshot<TimeSeriesData>> {
    Ok(Json(
        view_snapshot(&state.views.analytics, query.selection()).await,
    ))
}

/// GET /v1/durations?date=
pub async fn get_durations(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> HandlerResult<ViewSnapshot<DurationHistogramData>> {
    Ok(Json(
        view_snapshot(&state.views.durations, query.selection()).await,
    ))
}

/// GET /v1/rows?date=
pub async fn get_rows(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> HandlerResult<ViewSnapshot<RowDistributionData>> {
    Ok(Json(
        view_snapshot(&state.views.rows, query.selection()).await,
    ))
}

/// POST /v1/{view}/reload
///
/// Read the page's collection again and reset it to the most recent day.
pub async fn reload_view(
    State(state): State<AppState>,
    Path(view): Path<String>,
) -> HandlerResult<serde_json::Value> {
    let view: ViewName = view.parse().map_err(AppError::NotFound)?;
    let views = &state.views;

    let snapshot = match view {
        ViewName::Table => serde_json::to_value(views.table.reload().await),
        ViewName::Analytics => serde_json::to_value(views.analytics.reload().await),
        ViewName::Durations => serde_json::to_value(views.durations.reload().await),
        ViewName::Rows => serde_json::to_value(views.rows.reload().await),
    }
    .map_err(|e| AppError::Internal(format!("Failed to serialize snapshot: {}", e)))?;

    Ok(Json(snapshot))
}
