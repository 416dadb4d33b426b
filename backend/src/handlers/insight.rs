//! HTTP handler for AI shelf insights

use axum::{extract::State, Json};
use serde::Deserialize;
use shared::models::MedicineInsight;

use crate::external::insight::AnalyzeRequest;
use crate::AppState;

/// Insight query for one medicine.
#[derive(Debug, Deserialize)]
pub struct InsightQuery {
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub current_stock: i64,
    pub expiry_date: String,
    #[serde(default)]
    pub forecast: Option<i64>,
}

/// Generate a shelf insight. This endpoint cannot fail: collaborator
/// failures yield the neutral default payload.
pub async fn get_insight(
    State(state): State<AppState>,
    Json(query): Json<InsightQuery>,
) -> Json<MedicineInsight> {
    let request = AnalyzeRequest {
        name: query.name,
        location: query.location,
        stock: query.current_stock,
        expiry: query.expiry_date,
        forecast: query.forecast,
    };
    Json(state.insights.medicine_insight(&request).await)
}
