//! Reconciliation pipeline orchestration
//!
//! Runs the full Source Reader -> Stock Reconciler -> Demand Aggregator ->
//! View Materializer sequence and caches the result for the HTTP surface.
//! A watcher task re-runs the pipeline whenever the local store reports a
//! mutation under the watched key prefix.
//!
//! Runs are not cancellable and may overlap; each run captures a generation
//! number up front and a stale run can never overwrite a newer snapshot.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use shared::models::{
    DrugSale, ForecastRow, Medicine, PurchaseRecord, SaleRecord, Shipment, UploadedPurchaseRow,
    UploadedSaleRow,
};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::config::PipelineConfig;
use crate::sources::SourceReader;
use crate::store::{LocalStore, PURCHASE_KEY, SALES_KEY, WATCHED_PREFIX};

use super::demand::aggregate_demand;
use super::materialize::materialize;
use super::reconcile::reconcile;

/// Error string surfaced to the UI on total load failure.
const LOAD_ERROR: &str = "Failed to load data";

/// One complete materialized dashboard state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardSnapshot {
    pub medicines: Vec<Medicine>,
    pub shipments: Vec<Shipment>,
    /// Raw forecast rows, passed through for the calendar view
    pub forecast: Vec<ForecastRow>,
    /// Coarse load-error state; when set, the collections are empty
    pub error: Option<String>,
    pub generation: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// Pipeline service owning the cached snapshot.
pub struct PipelineService {
    reader: SourceReader,
    store: LocalStore,
    config: PipelineConfig,
    snapshot: RwLock<DashboardSnapshot>,
    generation: AtomicU64,
}

impl PipelineService {
    pub fn new(reader: SourceReader, store: LocalStore, config: PipelineConfig) -> Self {
        Self {
            reader,
            store,
            config,
            snapshot: RwLock::new(DashboardSnapshot::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// The reference "today" for one run: the configured fixed date when
    /// present, else the current UTC date. Captured once per run so every
    /// row is compared against the same instant.
    fn reference_date(&self) -> NaiveDate {
        self.config
            .reference_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Current cached snapshot.
    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Run the pipeline and install the result, unless a newer run already
    /// finished. Returns the snapshot this run produced.
    pub async fn refresh(&self) -> DashboardSnapshot {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.run(generation).await;

        let mut cached = self.snapshot.write().await;
        if result.generation > cached.generation {
            *cached = result.clone();
        } else {
            tracing::debug!(
                stale = result.generation,
                current = cached.generation,
                "Discarding stale pipeline result"
            );
        }
        result
    }

    /// One full pipeline pass. Never fails: a total source failure produces
    /// an error snapshot with empty collections.
    async fn run(&self, generation: u64) -> DashboardSnapshot {
        let today = self.reference_date();

        let bundle = match self.reader.fetch().await {
            Ok(bundle) => bundle,
            Err(e) => {
                tracing::error!(error = %e, "All inventory sources failed");
                return DashboardSnapshot {
                    error: Some(LOAD_ERROR.to_string()),
                    generation,
                    refreshed_at: Some(Utc::now()),
                    ..Default::default()
                };
            }
        };

        let uploaded_purchases: Vec<UploadedPurchaseRow> =
            self.store.read_rows(PURCHASE_KEY).await;
        let uploaded_sales: Vec<UploadedSaleRow> = self.store.read_rows(SALES_KEY).await;

        // Adapt every source into the canonical shapes; feed rows first so
        // batch creation order matches the feed.
        let purchases: Vec<PurchaseRecord> = bundle
            .purchases
            .iter()
            .map(PurchaseRecord::from_feed)
            .chain(
                uploaded_purchases
                    .iter()
                    .filter_map(|row| PurchaseRecord::from_uploaded(row, today)),
            )
            .collect();
        let sales: Vec<SaleRecord> = bundle.sales.iter().map(SaleRecord::from_feed).collect();
        let drug_sales: Vec<DrugSale> = uploaded_sales
            .iter()
            .filter_map(DrugSale::from_uploaded)
            .collect();

        let reconciliation = reconcile(&purchases, &sales, &drug_sales, today);
        let demand = aggregate_demand(&bundle.forecast);
        let medicines = materialize(
            &reconciliation.batches,
            &demand,
            self.config.hide_sold_out,
        );

        tracing::info!(
            batches = reconciliation.batches.len(),
            medicines = medicines.len(),
            shipments = reconciliation.shipments.len(),
            drugs_forecast = demand.len(),
            "Pipeline run complete"
        );

        DashboardSnapshot {
            medicines,
            shipments: reconciliation.shipments,
            forecast: bundle.forecast,
            error: None,
            generation,
            refreshed_at: Some(Utc::now()),
        }
    }

    /// Spawn the change-notifier task: any store mutation under the watched
    /// prefix re-runs the pipeline. No debouncing; feed sizes keep runs
    /// cheap enough that redundant re-runs are acceptable.
    pub fn spawn_watcher(self: &Arc<Self>) -> JoinHandle<()> {
        let pipeline = Arc::clone(self);
        let mut events = pipeline.store.subscribe();

        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) if event.key.starts_with(WATCHED_PREFIX) => {
                        tracing::info!(key = %event.key, "Store mutation, re-running pipeline");
                        pipeline.refresh().await;
                    }
                    Ok(_) => {}
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Store events lagged, re-running pipeline once");
                        pipeline.refresh().await;
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Access to the backing store (for the upload surface).
    pub fn store(&self) -> &LocalStore {
        &self.store
    }
}
