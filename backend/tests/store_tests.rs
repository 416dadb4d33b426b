//! Local store tests

use pharmacy_inventory_backend::store::{LocalStore, SALES_KEY};
use shared::models::UploadedSaleRow;
use tempfile::TempDir;

fn sale_row(product: &str, qty: &str) -> UploadedSaleRow {
    UploadedSaleRow {
        date: "2025-05-20".to_string(),
        product_name: product.to_string(),
        quantity_sold: qty.to_string(),
        unit_price: String::new(),
        total_amount: String::new(),
        customer_id: String::new(),
    }
}

#[tokio::test]
async fn test_missing_document_reads_empty() {
    let dir = TempDir::new().unwrap();
    let store = LocalStore::open(dir.path()).unwrap();

    let rows: Vec<UploadedSaleRow> = store.read_rows(SALES_KEY).await;
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_malformed_document_reads_empty() {
    let dir = TempDir::new().unwrap();
    let store = LocalStore::open(dir.path()).unwrap();
    std::fs::write(dir.path().join(format!("{}.json", SALES_KEY)), b"not json").unwrap();

    let rows: Vec<UploadedSaleRow> = store.read_rows(SALES_KEY).await;
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_append_accumulates_across_calls() {
    let dir = TempDir::new().unwrap();
    let store = LocalStore::open(dir.path()).unwrap();

    store
        .append_rows(SALES_KEY, &[sale_row("Paracetamol", "3")])
        .await
        .unwrap();
    let total = store
        .append_rows(SALES_KEY, &[sale_row("Aspirin", "1"), sale_row("Aspirin", "2")])
        .await
        .unwrap();
    assert_eq!(total, 3);

    let rows: Vec<UploadedSaleRow> = store.read_rows(SALES_KEY).await;
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].product_name, "Paracetamol");
    assert_eq!(rows[2].product_name, "Aspirin");
}

/// Concurrent appends from cloned handles must all land; the read-merge-write
/// cycle is serialized so no writer overwrites another's rows
#[tokio::test]
async fn test_concurrent_appends_lose_nothing() {
    let dir = TempDir::new().unwrap();
    let store = LocalStore::open(dir.path()).unwrap();

    let mut tasks = Vec::new();
    for i in 0..64 {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            store
                .append_rows(SALES_KEY, &[sale_row(&format!("Drug-{}", i), "1")])
                .await
                .unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let rows: Vec<UploadedSaleRow> = store.read_rows(SALES_KEY).await;
    assert_eq!(rows.len(), 64);

    // The staging file never outlives a completed append
    assert!(!dir.path().join(format!("{}.json.tmp", SALES_KEY)).exists());
}

#[tokio::test]
async fn test_append_publishes_change_event() {
    let dir = TempDir::new().unwrap();
    let store = LocalStore::open(dir.path()).unwrap();
    let mut events = store.subscribe();

    store
        .append_rows(SALES_KEY, &[sale_row("Paracetamol", "3")])
        .await
        .unwrap();

    let event = events.recv().await.unwrap();
    assert_eq!(event.key, SALES_KEY);
}
