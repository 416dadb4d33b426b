//! AI insight client
//!
//! Client for the external language-model analysis endpoint. Given a
//! medicine's name, location context, stock, and expiry, the service returns
//! a structured shelf insight. Callers should go through
//! `services::insight`, which converts every failure into a neutral default.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use shared::models::MedicineInsight;

use crate::config::InsightConfig;
use crate::error::{AppError, AppResult};

/// Client for the AI insight service
#[derive(Clone)]
pub struct InsightClient {
    client: Client,
    api_endpoint: String,
    api_key: String,
}

/// Request to analyze a medicine's shelf status
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub name: String,
    pub location: String,
    pub stock: i64,
    pub expiry: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<i64>,
}

impl InsightClient {
    pub fn new(config: &InsightConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_endpoint: config.api_endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Request a structured insight for one medicine.
    pub async fn analyze(&self, request: &AnalyzeRequest) -> AppResult<MedicineInsight> {
        if self.api_endpoint.is_empty() || self.api_key.is_empty() {
            return Err(AppError::Configuration(
                "insight service not configured".to_string(),
            ));
        }

        let response = self
            .client
            .post(&self.api_endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("insight request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "insight service returned {}",
                response.status()
            )));
        }

        response
            .json::<MedicineInsight>()
            .await
            .map_err(|e| AppError::ExternalService(format!("invalid insight payload: {}", e)))
    }
}
