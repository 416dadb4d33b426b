//! Demand aggregation
//!
//! Collapses the day-by-day forecast feed into a total predicted quantity per
//! drug. Keys are normalized (trimmed, lowercased) so the forecast file's
//! casing does not have to match the purchase feed's.

use std::collections::HashMap;

use shared::models::ForecastRow;
use shared::types::{normalize_drug_name, parse_qty_f64};

/// Sum predicted quantities per normalized drug name. Rows with an empty
/// drug name are skipped; summation carries no date weighting.
pub fn aggregate_demand(forecast: &[ForecastRow]) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();

    for row in forecast {
        let name = normalize_drug_name(&row.drug_name);
        if name.is_empty() {
            continue;
        }
        *totals.entry(name).or_insert(0.0) += parse_qty_f64(&row.predicted_qty);
    }

    totals
}
