//! Purchase records: raw feed rows, uploaded rows, and the canonical shape

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RecordSource;
use crate::types::{parse_cost, parse_date, parse_qty};

/// Raw purchase row as it appears in the purchases feed.
///
/// Header names are the exact case-sensitive strings from the CSV export;
/// every field arrives as text and is coerced during adaptation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PurchaseRow {
    #[serde(rename = "Purchase_ID", default)]
    pub purchase_id: String,
    #[serde(rename = "Date_Received", default)]
    pub date_received: String,
    #[serde(rename = "Drug_Name", default)]
    pub drug_name: String,
    #[serde(rename = "Supplier_Name", default)]
    pub supplier_name: String,
    #[serde(rename = "Batch_Number", default)]
    pub batch_number: String,
    #[serde(rename = "Qty_Received", default)]
    pub qty_received: String,
    #[serde(rename = "Unit_Cost_Price", default)]
    pub unit_cost_price: String,
    #[serde(rename = "Total_Purchase_Cost", default)]
    pub total_purchase_cost: String,
    #[serde(rename = "Expiry_Date", default)]
    pub expiry_date: String,
}

/// User-uploaded purchase row, persisted in the local store.
///
/// Uses the upload naming scheme (product name, quantity purchased) rather
/// than the feed scheme.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadedPurchaseRow {
    #[serde(rename = "Date", default)]
    pub date: String,
    #[serde(rename = "Product_Name", default)]
    pub product_name: String,
    #[serde(rename = "Quantity_Purchased", default)]
    pub quantity_purchased: String,
    #[serde(rename = "Unit_Cost", default)]
    pub unit_cost: String,
    #[serde(rename = "Supplier_Name", default)]
    pub supplier_name: String,
    #[serde(rename = "Batch_Number", default)]
    pub batch_number: String,
}

/// Canonical purchase record consumed by the stock reconciler.
///
/// Both row shapes normalize into this type before reconciliation, so the
/// reconciler never branches on field presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub id: String,
    pub date_received: Option<NaiveDate>,
    pub drug_name: String,
    pub supplier_name: String,
    pub batch_number: String,
    pub qty_received: i64,
    pub unit_cost: Decimal,
    pub total_cost: Decimal,
    /// Passed through as text; the view layer does not interpret it
    pub expiry_date: String,
    /// Raw received-date text, kept for shipment delivery estimates
    pub date_received_raw: String,
    pub source: RecordSource,
}

impl PurchaseRecord {
    /// Adapt a feed row. Never drops the row; malformed fields coerce to
    /// zero/`None` and an empty batch number is the reconciler's concern.
    pub fn from_feed(row: &PurchaseRow) -> Self {
        Self {
            id: row.purchase_id.clone(),
            date_received: parse_date(&row.date_received),
            drug_name: row.drug_name.clone(),
            supplier_name: row.supplier_name.clone(),
            batch_number: row.batch_number.trim().to_string(),
            qty_received: parse_qty(&row.qty_received),
            unit_cost: parse_cost(&row.unit_cost_price),
            total_cost: parse_cost(&row.total_purchase_cost),
            expiry_date: row.expiry_date.clone(),
            date_received_raw: row.date_received.clone(),
            source: RecordSource::CsvFeed,
        }
    }

    /// Adapt an uploaded row. Rows missing a batch number or product name are
    /// dropped here, and uploads carry no expiry column so one is synthesized
    /// a year out from the purchase date (or from `today` when the purchase
    /// date is unparsable).
    pub fn from_uploaded(row: &UploadedPurchaseRow, today: NaiveDate) -> Option<Self> {
        let batch_number = row.batch_number.trim();
        let product_name = row.product_name.trim();
        if batch_number.is_empty() || product_name.is_empty() {
            return None;
        }

        let date = parse_date(&row.date);
        let expiry = one_year_out(date.unwrap_or(today));

        Some(Self {
            id: String::new(),
            date_received: date,
            drug_name: product_name.to_string(),
            supplier_name: row.supplier_name.trim().to_string(),
            batch_number: batch_number.to_string(),
            qty_received: parse_qty(&row.quantity_purchased),
            unit_cost: parse_cost(&row.unit_cost),
            total_cost: Decimal::ZERO,
            expiry_date: expiry.format("%Y-%m-%d").to_string(),
            date_received_raw: row.date.clone(),
            source: RecordSource::Uploaded,
        })
    }
}

fn one_year_out(date: NaiveDate) -> NaiveDate {
    date.with_year(date.year() + 1)
        .unwrap_or_else(|| date + Duration::days(365))
}
