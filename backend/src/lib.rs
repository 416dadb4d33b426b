//! Pharmacy Inventory Management backend library
//!
//! Hosts the inventory reconciliation pipeline behind a small HTTP surface:
//! feed rows from a remote data service (or bundled CSV fallback) plus
//! locally uploaded records are merged into a per-batch stock view with
//! future-shipment and demand projections.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod sources;
pub mod store;

pub use config::Config;

use services::{InsightService, PipelineService, UploadService};
use sources::RemoteDataClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: Arc<PipelineService>,
    pub uploads: UploadService,
    pub remote: RemoteDataClient,
    pub insights: InsightService,
}
