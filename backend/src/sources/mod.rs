//! Raw data sources for the reconciliation pipeline
//!
//! The three feed collections (purchases, sales, forecast) come from one of
//! two interchangeable origins: the remote data service when it is reachable,
//! or the bundled flat files otherwise. Either way the reader hands the
//! pipeline the same homogeneous row collections.

pub mod files;
pub mod remote;

pub use files::FileSource;
pub use remote::RemoteDataClient;

use serde::{Deserialize, Serialize};
use shared::models::{ForecastRow, PurchaseRow, SaleRow};

use crate::error::AppResult;

/// The three feed collections, regardless of origin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceBundle {
    #[serde(default)]
    pub purchases: Vec<PurchaseRow>,
    #[serde(default)]
    pub sales: Vec<SaleRow>,
    #[serde(default)]
    pub forecast: Vec<ForecastRow>,
}

/// Remote-first source reader with flat-file fallback.
#[derive(Clone)]
pub struct SourceReader {
    remote: RemoteDataClient,
    files: FileSource,
}

impl SourceReader {
    pub fn new(remote: RemoteDataClient, files: FileSource) -> Self {
        Self { remote, files }
    }

    /// Fetch the feed collections. A remote failure falls back to the
    /// bundled files; only a failure of both surfaces as an error, which the
    /// pipeline converts into an error snapshot rather than a crash.
    pub async fn fetch(&self) -> AppResult<SourceBundle> {
        match self.remote.fetch_inventory().await {
            Ok(bundle) => {
                tracing::debug!(
                    purchases = bundle.purchases.len(),
                    sales = bundle.sales.len(),
                    forecast = bundle.forecast.len(),
                    "Loaded inventory from remote data service"
                );
                Ok(bundle)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Remote data service unavailable, falling back to bundled files");
                self.files.load().await
            }
        }
    }
}
