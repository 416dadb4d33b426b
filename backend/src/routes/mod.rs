//! Route definitions for the Pharmacy Inventory Management backend

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Materialized inventory view
        .nest("/inventory", inventory_routes())
        .route("/medicines", get(handlers::list_medicines))
        .route("/shipments", get(handlers::list_shipments))
        // Uploaded data files
        .route("/uploads", post(handlers::upload_data))
        // Manual entry forwarded to the remote data service
        .route("/transactions", post(handlers::record_transaction))
        // AI shelf insights
        .route("/insights", post(handlers::get_insight))
}

/// Inventory view routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_inventory))
        .route("/refresh", post(handlers::refresh_inventory))
}
