//! Upload ingestion service
//!
//! Accepts user CSV content, validates the header shape, and appends the
//! rows to the local store, which in turn notifies the pipeline.

use serde::Serialize;
use shared::models::{UploadedPurchaseRow, UploadedSaleRow};
use shared::validation::{infer_upload_kind, missing_headers, UploadKind};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::{LocalStore, PURCHASE_KEY, SALES_KEY};

/// Result of one accepted upload.
#[derive(Debug, Serialize)]
pub struct UploadOutcome {
    pub upload_id: Uuid,
    pub kind: UploadKind,
    pub rows_added: usize,
}

/// Upload ingestion service.
#[derive(Clone)]
pub struct UploadService {
    store: LocalStore,
}

impl UploadService {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Ingest one uploaded CSV file. The kind is inferred from the file
    /// name; header validation failures report every missing header.
    pub async fn ingest_csv(&self, file_name: &str, content: &str) -> AppResult<UploadOutcome> {
        let kind = infer_upload_kind(file_name);

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::ValidationError(format!("unreadable CSV: {}", e)))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let missing = missing_headers(&headers, kind);
        if !missing.is_empty() {
            return Err(AppError::Validation {
                field: "headers".to_string(),
                message: format!("Missing required headers: {}", missing.join(", ")),
            });
        }

        let rows_added = match kind {
            UploadKind::Sales => {
                let rows = collect_rows::<UploadedSaleRow>(reader, file_name);
                let added = rows.len();
                self.store.append_rows(SALES_KEY, &rows).await?;
                added
            }
            UploadKind::Purchase => {
                let rows = collect_rows::<UploadedPurchaseRow>(reader, file_name);
                let added = rows.len();
                self.store.append_rows(PURCHASE_KEY, &rows).await?;
                added
            }
        };

        let upload_id = Uuid::new_v4();
        tracing::info!(%upload_id, file_name, kind = kind.as_str(), rows_added, "Upload accepted");

        Ok(UploadOutcome {
            upload_id,
            kind,
            rows_added,
        })
    }
}

/// Deserialize the remaining rows, skipping undecodable ones.
fn collect_rows<T: serde::de::DeserializeOwned>(
    mut reader: csv::Reader<&[u8]>,
    file_name: &str,
) -> Vec<T> {
    let mut rows = Vec::new();
    for result in reader.deserialize::<T>() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                tracing::warn!(file_name, error = %e, "Skipping undecodable uploaded row");
            }
        }
    }
    rows
}
