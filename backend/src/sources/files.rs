//! Bundled flat-file fallback source
//!
//! The three feeds ship with the deployment as comma-separated files with
//! header rows. They are read concurrently; a ragged or undecodable row is
//! skipped with a warning rather than failing the load.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::config::DataFilesConfig;
use crate::error::{AppError, AppResult};

use super::SourceBundle;

/// Flat-file source for the three feed collections.
#[derive(Clone)]
pub struct FileSource {
    purchases_path: PathBuf,
    sales_path: PathBuf,
    forecast_path: PathBuf,
}

impl FileSource {
    pub fn new(config: &DataFilesConfig) -> Self {
        let dir = Path::new(&config.dir);
        Self {
            purchases_path: dir.join(&config.purchases_file),
            sales_path: dir.join(&config.sales_file),
            forecast_path: dir.join(&config.forecast_file),
        }
    }

    /// Load all three feeds, reading the files concurrently.
    pub async fn load(&self) -> AppResult<SourceBundle> {
        let (purchases, sales, forecast) = tokio::try_join!(
            read_csv(&self.purchases_path),
            read_csv(&self.sales_path),
            read_csv(&self.forecast_path),
        )?;

        Ok(SourceBundle {
            purchases,
            sales,
            forecast,
        })
    }
}

/// Read and deserialize one delimited file with a header row.
async fn read_csv<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::DataUnavailable(format!("read {}: {}", path.display(), e)))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes.as_slice());

    let mut rows = Vec::new();
    for result in reader.deserialize::<T>() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Skipping undecodable CSV row");
            }
        }
    }
    Ok(rows)
}
