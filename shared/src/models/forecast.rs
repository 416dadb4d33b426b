//! Demand forecast rows

use serde::{Deserialize, Serialize};

/// Raw forecast row from the 30-day forecast feed. One row per drug per day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastRow {
    #[serde(rename = "Date", default)]
    pub date: String,
    #[serde(rename = "Forecast_Date", default)]
    pub forecast_date: String,
    #[serde(rename = "Drug_Name", default)]
    pub drug_name: String,
    #[serde(rename = "Predicted_Qty", default)]
    pub predicted_qty: String,
}
