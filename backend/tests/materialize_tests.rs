//! View materialization tests

use std::collections::HashMap;

use chrono::NaiveDate;
use pharmacy_inventory_backend::services::materialize::materialize;
use pharmacy_inventory_backend::services::reconcile::{reconcile, BatchLedger};
use rust_decimal::Decimal;
use shared::models::{PurchaseRecord, RecordSource, SaleRecord};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn purchase(batch: &str, drug: &str, qty: i64) -> PurchaseRecord {
    PurchaseRecord {
        id: format!("PO-{}", batch),
        date_received: NaiveDate::from_ymd_opt(2025, 1, 15),
        drug_name: drug.to_string(),
        supplier_name: "MedSupply".to_string(),
        batch_number: batch.to_string(),
        qty_received: qty,
        unit_cost: Decimal::ZERO,
        total_cost: Decimal::ZERO,
        expiry_date: "2026-06-01".to_string(),
        date_received_raw: "2025-01-15".to_string(),
        source: RecordSource::CsvFeed,
    }
}

fn sale(batch: &str, qty: i64) -> SaleRecord {
    SaleRecord {
        id: "TXN-1".to_string(),
        date: Some(today()),
        drug_name: String::new(),
        batch_number: batch.to_string(),
        qty_sold: qty,
    }
}

fn ledger(purchases: &[PurchaseRecord], sales: &[SaleRecord]) -> BatchLedger {
    reconcile(purchases, sales, &[], today()).batches
}

fn demand(entries: &[(&str, f64)]) -> HashMap<String, f64> {
    entries
        .iter()
        .map(|(name, qty)| (name.to_string(), *qty))
        .collect()
}

/// Scenario E end-to-end: 40 units of 30-day demand is 10 per week
#[test]
fn test_weekly_demand_is_quarter_of_total() {
    let ledger = ledger(&[purchase("B1", "Paracetamol", 100)], &[]);
    let medicines = materialize(&ledger, &demand(&[("paracetamol", 40.0)]), false);

    assert_eq!(medicines.len(), 1);
    assert_eq!(medicines[0].predicted_demand, 10);
}

/// The divisor result is rounded, not truncated
#[test]
fn test_weekly_demand_rounds() {
    let ledger = ledger(&[purchase("B1", "Paracetamol", 100)], &[]);
    let medicines = materialize(&ledger, &demand(&[("paracetamol", 10.0)]), false);

    // 10 / 4 = 2.5 rounds up to 3
    assert_eq!(medicines[0].predicted_demand, 3);
}

/// Drugs without forecast data get the non-zero floor
#[test]
fn test_missing_forecast_falls_back() {
    let ledger = ledger(&[purchase("B1", "Paracetamol", 100)], &[]);
    let medicines = materialize(&ledger, &HashMap::new(), false);

    assert_eq!(medicines[0].predicted_demand, 5);
}

/// A zero-sum forecast also triggers the floor
#[test]
fn test_zero_forecast_falls_back() {
    let ledger = ledger(&[purchase("B1", "Paracetamol", 100)], &[]);
    let medicines = materialize(&ledger, &demand(&[("paracetamol", 0.0)]), false);

    assert_eq!(medicines[0].predicted_demand, 5);
}

/// Internally negative stock displays as zero
#[test]
fn test_negative_stock_clamps_to_zero() {
    let ledger = ledger(&[purchase("B1", "Paracetamol", 10)], &[sale("B1", 25)]);
    let medicines = materialize(&ledger, &HashMap::new(), false);

    assert_eq!(medicines.len(), 1);
    assert_eq!(medicines[0].current_stock, 0);
}

/// With hide_sold_out set, non-positive batches disappear and numbering
/// stays dense
#[test]
fn test_hide_sold_out_drops_batches() {
    let ledger = ledger(
        &[purchase("B1", "Paracetamol", 10), purchase("B2", "Aspirin", 50)],
        &[sale("B1", 10)],
    );
    let medicines = materialize(&ledger, &HashMap::new(), true);

    assert_eq!(medicines.len(), 1);
    assert_eq!(medicines[0].batch_number, "B2");
    assert_eq!(medicines[0].id, "1");
}

/// Ids are sequential in first-seen batch order; category is the placeholder
#[test]
fn test_ids_and_category() {
    let ledger = ledger(
        &[
            purchase("B2", "Aspirin", 50),
            purchase("B1", "Paracetamol", 10),
        ],
        &[],
    );
    let medicines = materialize(&ledger, &HashMap::new(), false);

    assert_eq!(medicines[0].id, "1");
    assert_eq!(medicines[0].batch_number, "B2");
    assert_eq!(medicines[1].id, "2");
    assert_eq!(medicines[1].batch_number, "B1");
    assert!(medicines.iter().all(|m| m.category == "General"));
}

/// Demand lookup normalizes the batch's drug name before matching
#[test]
fn test_demand_lookup_normalizes_name() {
    let ledger = ledger(&[purchase("B1", "  PARACETAMOL ", 100)], &[]);
    let medicines = materialize(&ledger, &demand(&[("paracetamol", 40.0)]), false);

    assert_eq!(medicines[0].predicted_demand, 10);
}
