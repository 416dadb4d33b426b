//! Sale records: raw feed rows, uploaded rows, and the canonical shapes

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{parse_date, parse_qty};

/// Raw sale row from the sales feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaleRow {
    #[serde(rename = "Transaction_ID", default)]
    pub transaction_id: String,
    #[serde(rename = "Date", default)]
    pub date: String,
    #[serde(rename = "Drug_Name", default)]
    pub drug_name: String,
    #[serde(rename = "Batch_Number", default)]
    pub batch_number: String,
    #[serde(rename = "Qty_Sold", default)]
    pub qty_sold: String,
}

/// User-uploaded sale row, persisted in the local store.
///
/// Unlike the feed, uploads identify the product by name only; there is no
/// batch column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadedSaleRow {
    #[serde(rename = "Date", default)]
    pub date: String,
    #[serde(rename = "Product_Name", default)]
    pub product_name: String,
    #[serde(rename = "Quantity_Sold", default)]
    pub quantity_sold: String,
    #[serde(rename = "Unit_Price", default)]
    pub unit_price: String,
    #[serde(rename = "Total_Amount", default)]
    pub total_amount: String,
    #[serde(rename = "Customer_ID", default)]
    pub customer_id: String,
}

/// Canonical batch-referencing sale consumed by the reconciler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: String,
    pub date: Option<NaiveDate>,
    pub drug_name: String,
    pub batch_number: String,
    pub qty_sold: i64,
}

impl SaleRecord {
    pub fn from_feed(row: &SaleRow) -> Self {
        Self {
            id: row.transaction_id.clone(),
            date: parse_date(&row.date),
            drug_name: row.drug_name.clone(),
            batch_number: row.batch_number.trim().to_string(),
            qty_sold: parse_qty(&row.qty_sold),
        }
    }
}

/// Canonical by-drug sale (uploaded shape). Allocated against batches by the
/// reconciler's expiry-ordered policy rather than a batch reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugSale {
    pub product_name: String,
    pub qty_sold: i64,
}

impl DrugSale {
    /// Adapt an uploaded row; rows with an empty product name are dropped.
    pub fn from_uploaded(row: &UploadedSaleRow) -> Option<Self> {
        let product_name = row.product_name.trim();
        if product_name.is_empty() {
            return None;
        }
        Some(Self {
            product_name: product_name.to_string(),
            qty_sold: parse_qty(&row.quantity_sold),
        })
    }
}
