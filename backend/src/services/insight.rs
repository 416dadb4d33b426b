//! Insight service
//!
//! Thin wrapper around the external AI client applying the collaborator
//! error policy: any failure becomes the neutral default payload, never an
//! error to the caller.

use shared::models::MedicineInsight;

use crate::external::insight::{AnalyzeRequest, InsightClient};

#[derive(Clone)]
pub struct InsightService {
    client: InsightClient,
}

impl InsightService {
    pub fn new(client: InsightClient) -> Self {
        Self { client }
    }

    /// Fetch an insight for one medicine. Never returns an error.
    pub async fn medicine_insight(&self, request: &AnalyzeRequest) -> MedicineInsight {
        match self.client.analyze(request).await {
            Ok(insight) => insight,
            Err(e) => {
                tracing::warn!(name = %request.name, error = %e, "Insight service failed, using default");
                MedicineInsight::default()
            }
        }
    }
}
