//! Structured insight payload from the external AI collaborator

use serde::{Deserialize, Serialize};

/// AI-generated shelf insight for a medicine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineInsight {
    pub description: String,
    pub usage_context: String,
    pub price_trend: PriceTrend,
    pub trend_reason: String,
    pub demand_level: DemandLevel,
    pub is_emergency: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriceTrend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DemandLevel {
    High,
    Medium,
    Low,
}

impl Default for MedicineInsight {
    /// Neutral payload used whenever the collaborator fails; insight errors
    /// never propagate past the service boundary.
    fn default() -> Self {
        Self {
            description: "Insight unavailable.".to_string(),
            usage_context: String::new(),
            price_trend: PriceTrend::Stable,
            trend_reason: String::new(),
            demand_level: DemandLevel::Medium,
            is_emergency: false,
        }
    }
}
