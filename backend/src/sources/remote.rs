//! Client for the remote inventory data service
//!
//! The service fronts the shared spreadsheet holding the live feeds. Any
//! transport error or non-success status is treated as "server offline" and
//! triggers the flat-file fallback; the request timeout below is what bounds
//! that decision.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;

use crate::error::{AppError, AppResult};

use super::SourceBundle;

/// Remote data service client
#[derive(Clone)]
pub struct RemoteDataClient {
    client: Client,
    base_url: String,
}

/// Body for appending a single manual transaction row.
#[derive(Debug, Serialize)]
struct AppendTransactionRequest<'a> {
    sheet: &'a str,
    row: &'a [serde_json::Value],
}

/// Body for bulk-uploading rows to a named sheet.
#[derive(Debug, Serialize)]
struct UploadRowsRequest<'a> {
    sheet: &'a str,
    data: &'a [Vec<String>],
}

impl RemoteDataClient {
    /// Create a new client. The timeout bounds every request so a hung
    /// service cannot stall the pipeline's fallback path.
    pub fn new(base_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;
        Ok(Self { client, base_url })
    }

    /// Fetch the three feed collections as a single JSON payload.
    pub async fn fetch_inventory(&self) -> AppResult<SourceBundle> {
        let url = format!("{}/api/inventory", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("inventory fetch failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "data service returned {}",
                response.status()
            )));
        }

        response
            .json::<SourceBundle>()
            .await
            .map_err(|e| AppError::ExternalService(format!("invalid inventory payload: {}", e)))
    }

    /// Append one manual transaction row to the named sheet.
    pub async fn append_transaction(
        &self,
        sheet: &str,
        row: &[serde_json::Value],
    ) -> AppResult<()> {
        let url = format!("{}/api/transaction", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&AppendTransactionRequest { sheet, row })
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("transaction append failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "data service returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// Bulk-upload rows to the named sheet.
    pub async fn upload_rows(&self, sheet: &str, rows: &[Vec<String>]) -> AppResult<()> {
        let url = format!("{}/api/upload", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&UploadRowsRequest { sheet, data: rows })
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("bulk upload failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "data service returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}
