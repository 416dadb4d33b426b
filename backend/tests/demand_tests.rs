//! Demand aggregation tests

use pharmacy_inventory_backend::services::demand::aggregate_demand;
use proptest::prelude::*;
use shared::models::ForecastRow;

fn forecast(drug: &str, qty: &str) -> ForecastRow {
    ForecastRow {
        date: "2025-06-02".to_string(),
        forecast_date: "2025-06-02".to_string(),
        drug_name: drug.to_string(),
        predicted_qty: qty.to_string(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Scenario E input: four rows of 10 sum to 40
    #[test]
    fn test_sums_per_drug() {
        let rows = vec![
            forecast("Paracetamol", "10"),
            forecast("Paracetamol", "10"),
            forecast("Paracetamol", "10"),
            forecast("Paracetamol", "10"),
        ];
        let totals = aggregate_demand(&rows);

        assert_eq!(totals.get("paracetamol"), Some(&40.0));
    }

    /// Keys are normalized; casing and padding collapse into one entry
    #[test]
    fn test_normalizes_drug_names() {
        let rows = vec![
            forecast("Paracetamol", "10"),
            forecast("  PARACETAMOL ", "5"),
            forecast("paracetamol", "2.5"),
        ];
        let totals = aggregate_demand(&rows);

        assert_eq!(totals.len(), 1);
        assert_eq!(totals.get("paracetamol"), Some(&17.5));
    }

    /// Rows with an empty drug name are skipped
    #[test]
    fn test_skips_empty_drug_names() {
        let rows = vec![forecast("", "10"), forecast("   ", "10"), forecast("Aspirin", "3")];
        let totals = aggregate_demand(&rows);

        assert_eq!(totals.len(), 1);
        assert_eq!(totals.get("aspirin"), Some(&3.0));
    }

    /// Malformed quantities coerce to zero instead of dropping the drug
    #[test]
    fn test_malformed_quantity_counts_as_zero() {
        let rows = vec![forecast("Aspirin", "???"), forecast("Aspirin", "4")];
        let totals = aggregate_demand(&rows);

        assert_eq!(totals.get("aspirin"), Some(&4.0));
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        assert!(aggregate_demand(&[]).is_empty());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Aggregation is order-independent: forward and reversed row order
    /// produce identical totals (integer-valued quantities keep f64 addition
    /// exact)
    #[test]
    fn prop_order_independent(quantities in prop::collection::vec(0u16..1000, 0..50)) {
        let rows: Vec<_> = quantities
            .iter()
            .map(|q| forecast("Paracetamol", &q.to_string()))
            .collect();
        let mut reversed = rows.clone();
        reversed.reverse();

        prop_assert_eq!(aggregate_demand(&rows), aggregate_demand(&reversed));
    }

    /// The single-drug total equals the plain sum of the quantities
    #[test]
    fn prop_total_is_plain_sum(quantities in prop::collection::vec(0u16..1000, 1..50)) {
        let rows: Vec<_> = quantities
            .iter()
            .map(|q| forecast("Aspirin", &q.to_string()))
            .collect();
        let totals = aggregate_demand(&rows);

        let expected: f64 = quantities.iter().map(|q| *q as f64).sum();
        prop_assert_eq!(totals.get("aspirin").copied(), Some(expected));
    }
}
