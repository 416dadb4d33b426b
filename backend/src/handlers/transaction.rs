//! HTTP handler for manual single-row data entry
//!
//! Builds the sheet row for the remote data service the same way the manual
//! entry form does. This surface has no local fallback: if the data service
//! is offline the entry is rejected rather than silently diverging from the
//! sheet.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::AppResult;
use crate::AppState;

/// Target sheet for a manual entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum EntryType {
    Sales,
    Purchases,
}

impl EntryType {
    pub fn sheet_name(&self) -> &'static str {
        match self {
            EntryType::Sales => "Sales",
            EntryType::Purchases => "Purchases",
        }
    }
}

/// Manual entry input. `extra` is the unit price for sales and the unit
/// cost for purchases.
#[derive(Debug, Deserialize)]
pub struct ManualEntryInput {
    pub entry_type: EntryType,
    pub date: String,
    pub drug_name: String,
    pub batch_number: String,
    pub quantity: i64,
    #[serde(default)]
    pub extra: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ManualEntryResponse {
    pub entry_id: String,
    pub sheet: &'static str,
}

/// Append one manual transaction row via the remote data service.
pub async fn record_transaction(
    State(state): State<AppState>,
    Json(input): Json<ManualEntryInput>,
) -> AppResult<Json<ManualEntryResponse>> {
    let unit_value = input.extra.unwrap_or(0.0);
    let total = unit_value * input.quantity as f64;

    let (entry_id, row) = build_sheet_row(&input, unit_value, total);
    state
        .remote
        .append_transaction(input.entry_type.sheet_name(), &row)
        .await?;

    tracing::info!(%entry_id, sheet = input.entry_type.sheet_name(), "Manual entry appended");

    Ok(Json(ManualEntryResponse {
        entry_id,
        sheet: input.entry_type.sheet_name(),
    }))
}

/// Build the positional sheet row for an entry. Column order must match the
/// sheet schemas:
/// Sales: Transaction_ID, Date, Drug_Name, Batch_Number, Qty_Sold, MRP, Total
/// Purchases: PO_ID, Date, Drug, Supplier, Batch, Qty, UnitCost, Total,
/// Expiry, Date
fn build_sheet_row(input: &ManualEntryInput, unit_value: f64, total: f64) -> (String, Vec<Value>) {
    match input.entry_type {
        EntryType::Sales => {
            let id = format!("TXN-{}", short_id());
            let row = vec![
                json!(id),
                json!(input.date),
                json!(input.drug_name),
                json!(input.batch_number),
                json!(input.quantity),
                json!(unit_value),
                json!(total),
            ];
            (id, row)
        }
        EntryType::Purchases => {
            let id = format!("PO-{}", short_id());
            let row = vec![
                json!(id),
                json!(input.date),
                json!(input.drug_name),
                // Manual purchases have no supplier field on the form
                json!("Manual Entry"),
                json!(input.batch_number),
                json!(input.quantity),
                json!(unit_value),
                json!(total),
                json!("2025-12-31"),
                json!(""),
            ];
            (id, row)
        }
    }
}

fn short_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    id[..8].to_uppercase()
}
