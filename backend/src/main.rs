//! Pharmacy Inventory Management - Backend Server
//!
//! Serves the pharmacy dashboard's materialized inventory view: stock per
//! batch reconciled from purchase/sale feeds and uploaded records, future
//! shipments, and demand projections.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pharmacy_inventory_backend::{
    config::Config,
    external::InsightClient,
    routes,
    services::{InsightService, PipelineService, UploadService},
    sources::{FileSource, RemoteDataClient, SourceReader},
    store::LocalStore,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pim_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Pharmacy Inventory Management Server");
    tracing::info!("Environment: {}", config.environment);

    // Wire up the data sources and local store
    let remote = RemoteDataClient::new(
        config.remote.base_url.clone(),
        Duration::from_secs(config.remote.timeout_secs),
    )?;
    let files = FileSource::new(&config.data);
    let store = LocalStore::open(&config.store.dir)?;

    let pipeline = Arc::new(PipelineService::new(
        SourceReader::new(remote.clone(), files),
        store.clone(),
        config.pipeline.clone(),
    ));

    // Initial run, then watch for uploaded-data mutations
    pipeline.refresh().await;
    pipeline.spawn_watcher();

    let insights = InsightService::new(InsightClient::new(&config.insight)?);

    let state = AppState {
        config: Arc::new(config.clone()),
        pipeline,
        uploads: UploadService::new(store.clone()),
        remote,
        insights,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Pharmacy Inventory Management API v1.0"
}

/// Liveness endpoint
async fn health() -> &'static str {
    "OK"
}
