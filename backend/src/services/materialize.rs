//! View materialization
//!
//! Joins reconciled per-batch stock with aggregated demand into the Medicine
//! records the dashboard consumes, one per batch, in first-seen batch order.

use std::collections::HashMap;

use shared::models::Medicine;
use shared::types::normalize_drug_name;

use super::reconcile::BatchLedger;

/// The forecast feed covers roughly thirty days; dividing the summed total
/// by four approximates one week of demand.
const WEEKLY_DIVISOR: f64 = 4.0;

/// Floor applied when a drug has no usable forecast, so downstream low-stock
/// comparisons stay meaningful.
const FALLBACK_WEEKLY_DEMAND: i64 = 5;

/// The feeds carry no category column.
const DEFAULT_CATEGORY: &str = "General";

/// Materialize the dashboard view. `hide_sold_out` drops batches whose
/// internal stock is non-positive before numbering; stock is clamped at zero
/// either way.
pub fn materialize(
    ledger: &BatchLedger,
    demand_by_drug: &HashMap<String, f64>,
    hide_sold_out: bool,
) -> Vec<Medicine> {
    let mut medicines = Vec::with_capacity(ledger.len());
    let mut id_counter = 1u64;

    for batch in ledger.iter() {
        if hide_sold_out && batch.current_stock <= 0 {
            continue;
        }

        let total_forecast = demand_by_drug
            .get(&normalize_drug_name(&batch.drug_name))
            .copied()
            .unwrap_or(0.0);
        let weekly_demand = (total_forecast / WEEKLY_DIVISOR).round() as i64;

        medicines.push(Medicine {
            id: id_counter.to_string(),
            name: batch.drug_name.clone(),
            batch_number: batch.batch_number.clone(),
            category: DEFAULT_CATEGORY.to_string(),
            current_stock: batch.current_stock.max(0),
            expiry_date: batch.expiry_date.clone(),
            predicted_demand: if weekly_demand > 0 {
                weekly_demand
            } else {
                FALLBACK_WEEKLY_DEMAND
            },
        });
        id_counter += 1;
    }

    medicines
}
