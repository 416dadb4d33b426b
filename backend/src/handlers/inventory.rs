//! HTTP handlers for the materialized inventory view

use axum::{extract::State, Json};
use shared::models::{Medicine, Shipment};

use crate::error::{AppError, AppResult};
use crate::services::pipeline::DashboardSnapshot;
use crate::AppState;

/// Get the full dashboard snapshot (medicines, shipments, forecast, and the
/// coarse load-error state).
pub async fn get_inventory(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(state.pipeline.snapshot().await)
}

/// Get the materialized medicine records.
pub async fn list_medicines(State(state): State<AppState>) -> Json<Vec<Medicine>> {
    Json(state.pipeline.snapshot().await.medicines)
}

/// Get the future shipments.
pub async fn list_shipments(State(state): State<AppState>) -> Json<Vec<Shipment>> {
    Json(state.pipeline.snapshot().await.shipments)
}

/// Force a pipeline re-run. Unlike the cached reads above, a total load
/// failure here surfaces as a 503 so callers know the refresh found nothing.
pub async fn refresh_inventory(
    State(state): State<AppState>,
) -> AppResult<Json<DashboardSnapshot>> {
    let snapshot = state.pipeline.refresh().await;
    if let Some(error) = &snapshot.error {
        return Err(AppError::DataUnavailable(error.clone()));
    }
    Ok(Json(snapshot))
}
