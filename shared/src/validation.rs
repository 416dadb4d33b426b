//! Validation utilities for uploaded data files

/// Recognized upload shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Sales,
    Purchase,
}

impl UploadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadKind::Sales => "sales",
            UploadKind::Purchase => "purchase",
        }
    }
}

/// Required headers for uploaded sales files.
pub const SALES_HEADERS: [&str; 6] = [
    "Date",
    "Product_Name",
    "Quantity_Sold",
    "Unit_Price",
    "Total_Amount",
    "Customer_ID",
];

/// Required headers for uploaded purchase files.
pub const PURCHASE_HEADERS: [&str; 6] = [
    "Date",
    "Product_Name",
    "Quantity_Purchased",
    "Unit_Cost",
    "Supplier_Name",
    "Batch_Number",
];

/// Infer the upload kind from the file name; defaults to sales.
pub fn infer_upload_kind(file_name: &str) -> UploadKind {
    let lower = file_name.to_lowercase();
    if lower.contains("sale") || lower.contains("sold") {
        return UploadKind::Sales;
    }
    if lower.contains("purchase") || lower.contains("buy") || lower.contains("order") {
        return UploadKind::Purchase;
    }
    UploadKind::Sales
}

/// Validate that an uploaded file carries the required headers for its kind.
///
/// Matching is forgiving about case, underscores, and whitespace, so
/// `"quantity sold"` satisfies `Quantity_Sold`. Returns the list of missing
/// required headers; empty means valid.
pub fn missing_headers(headers: &[String], kind: UploadKind) -> Vec<&'static str> {
    let required: &[&'static str] = match kind {
        UploadKind::Sales => &SALES_HEADERS,
        UploadKind::Purchase => &PURCHASE_HEADERS,
    };

    required
        .iter()
        .filter(|req| {
            !headers
                .iter()
                .any(|h| canonical_header(h) == canonical_header(req))
        })
        .copied()
        .collect()
}

fn canonical_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| *c != '_' && !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
