//! Materialized view records consumed by the dashboard UI

use serde::{Deserialize, Serialize};

/// One row of the dashboard's inventory view, one per batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    /// Sequential 1-based identifier, rebuilt on every pipeline run
    pub id: String,
    pub name: String,
    pub batch_number: String,
    /// The feeds carry no category column; fixed placeholder
    pub category: String,
    /// Clamped non-negative at materialization
    pub current_stock: i64,
    pub expiry_date: String,
    /// Weekly-equivalent demand with a non-zero floor
    pub predicted_demand: i64,
}

/// A purchase scheduled to arrive after the reference date, shown on the
/// logistics view instead of contributing to stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: String,
    pub tracking_number: String,
    pub origin: String,
    pub destination: String,
    pub status: ShipmentStatus,
    pub estimated_delivery: String,
    pub medicines: Vec<String>,
    pub quantity: i64,
}

/// Shipment status. Purchases not yet received are always in transit; the
/// feeds carry no carrier events to refine this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentStatus {
    #[serde(rename = "In Transit")]
    InTransit,
}

impl ShipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::InTransit => "In Transit",
        }
    }
}
