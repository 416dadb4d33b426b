//! Stock reconciliation
//!
//! Merges purchase and sale events into a net current-stock figure per batch,
//! diverting purchases dated after the reference day into a shipment list.
//! The reconciler never fails; every malformed or orphaned row degrades that
//! row alone.

use std::collections::HashMap;

use chrono::NaiveDate;
use shared::models::{
    DrugSale, PurchaseRecord, RecordSource, SaleRecord, Shipment, ShipmentStatus,
};
use shared::types::{normalize_drug_name, parse_date};
use uuid::Uuid;

/// Fixed destination for synthesized shipments; the feeds carry no
/// destination data.
const SHIPMENT_DESTINATION: &str = "Central Warehouse";

/// Running stock for one received batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchAggregate {
    pub batch_number: String,
    pub drug_name: String,
    pub supplier_name: String,
    pub expiry_date: String,
    /// Signed; sales exceeding recorded purchases drive this negative, the
    /// view layer clamps at zero
    pub current_stock: i64,
    /// Sum of all receipts; never decremented
    pub initial_stock: i64,
}

/// Batch aggregates keyed by batch number, iterated in first-seen order.
#[derive(Debug, Default)]
pub struct BatchLedger {
    batches: HashMap<String, BatchAggregate>,
    order: Vec<String>,
}

impl BatchLedger {
    pub fn get(&self, batch_number: &str) -> Option<&BatchAggregate> {
        self.batches.get(batch_number)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate aggregates in the order their batch numbers first appeared.
    pub fn iter(&self) -> impl Iterator<Item = &BatchAggregate> {
        self.order.iter().filter_map(|k| self.batches.get(k))
    }

    fn get_or_create(&mut self, record: &PurchaseRecord) -> &mut BatchAggregate {
        use std::collections::hash_map::Entry;

        match self.batches.entry(record.batch_number.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.order.push(record.batch_number.clone());
                entry.insert(BatchAggregate {
                    batch_number: record.batch_number.clone(),
                    drug_name: record.drug_name.clone(),
                    supplier_name: record.supplier_name.clone(),
                    expiry_date: record.expiry_date.clone(),
                    current_stock: 0,
                    initial_stock: 0,
                })
            }
        }
    }

    fn get_mut(&mut self, batch_number: &str) -> Option<&mut BatchAggregate> {
        self.batches.get_mut(batch_number)
    }
}

/// Output of one reconciliation pass.
#[derive(Debug, Default)]
pub struct Reconciliation {
    pub batches: BatchLedger,
    pub shipments: Vec<Shipment>,
}

/// Reconcile purchases against sales for one pipeline run.
///
/// `purchases` holds both feed and uploaded records (already adapted to the
/// canonical shape); only feed records are eligible for the future-shipment
/// partition. `today` is a single fixed instant for the whole run.
pub fn reconcile(
    purchases: &[PurchaseRecord],
    sales: &[SaleRecord],
    drug_sales: &[DrugSale],
    today: NaiveDate,
) -> Reconciliation {
    let mut result = Reconciliation::default();

    for purchase in purchases {
        if purchase.batch_number.is_empty() {
            continue;
        }

        // Only feed rows carry delivery dates worth partitioning on;
        // uploaded purchases always count as received.
        if purchase.source == RecordSource::CsvFeed {
            if let Some(received) = purchase.date_received {
                if received > today {
                    result.shipments.push(to_shipment(purchase));
                    continue;
                }
            }
        }

        let batch = result.batches.get_or_create(purchase);
        batch.current_stock += purchase.qty_received;
        batch.initial_stock += purchase.qty_received;
    }

    for sale in sales {
        if sale.batch_number.is_empty() {
            continue;
        }
        // A sale against an unknown batch cannot decrement anything
        if let Some(batch) = result.batches.get_mut(&sale.batch_number) {
            batch.current_stock -= sale.qty_sold;
        }
    }

    for sale in drug_sales {
        allocate_fefo(&mut result.batches, sale);
    }

    result
}

/// Allocate a by-drug sale across the drug's open batches,
/// soonest-expiring-first. The last matched batch absorbs any remainder so
/// totals still reconcile even when the sale exceeds recorded stock; a sale
/// matching no batch is a silent no-op.
fn allocate_fefo(ledger: &mut BatchLedger, sale: &DrugSale) {
    let wanted = normalize_drug_name(&sale.product_name);

    let mut matched: Vec<String> = ledger
        .iter()
        .filter(|b| normalize_drug_name(&b.drug_name) == wanted)
        .map(|b| b.batch_number.clone())
        .collect();
    if matched.is_empty() {
        return;
    }

    // Unparsable expiry dates sort last; ties keep ledger order
    matched.sort_by_key(|key| {
        ledger
            .get(key)
            .and_then(|b| parse_date(&b.expiry_date))
            .unwrap_or(NaiveDate::MAX)
    });

    let mut remaining = sale.qty_sold;
    let last = matched.len() - 1;
    for (i, key) in matched.iter().enumerate() {
        let Some(batch) = ledger.get_mut(key) else {
            continue;
        };
        if i == last {
            batch.current_stock -= remaining;
            break;
        }
        let take = remaining.min(batch.current_stock.max(0));
        batch.current_stock -= take;
        remaining -= take;
        if remaining == 0 {
            break;
        }
    }
}

fn to_shipment(purchase: &PurchaseRecord) -> Shipment {
    let id = if purchase.id.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        purchase.id.clone()
    };

    let origin = if purchase.supplier_name.trim().is_empty() {
        "Supplier".to_string()
    } else {
        purchase.supplier_name.clone()
    };

    Shipment {
        tracking_number: format!("TRK-{}", id),
        id,
        origin,
        destination: SHIPMENT_DESTINATION.to_string(),
        status: ShipmentStatus::InTransit,
        estimated_delivery: purchase.date_received_raw.clone(),
        medicines: vec![purchase.drug_name.clone()],
        quantity: purchase.qty_received,
    }
}
