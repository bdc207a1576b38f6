//! Tests for store persistence.

use anyhow::Result;
use flightbeam::testing::*;
use flightbeam::*;
use serde_json::Value;

#[test]
fn test_ingest_save_load_round_trip() -> Result<()> {
    let dir = TempSourceDir::new()?;
    let path = dir.file_path("db.json");

    let ingestion = ingest_text(&sample_lines().join("\n"));
    let store = Store::new(ingestion.records);
    store.save(&path)?;

    assert_records_equal(Store::load(&path)?.records(), &sample_records());
    Ok(())
}

#[test]
fn test_store_document_keys_and_types() -> Result<()> {
    let dir = TempSourceDir::new()?;
    let path = dir.file_path("db.json");
    Store::new(sample_records()).save(&path)?;

    let text = std::fs::read_to_string(&path)?;
    let doc: Value = serde_json::from_str(&text)?;
    let first = doc[0].as_object().unwrap();
    let keys: Vec<&str> = first.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["flight_id", "origin", "destination", "departure_datetime", "arrival_datetime", "price"]
    );
    assert!(first["price"].is_number());
    assert!(text.contains("\n    {\n        \"flight_id\""));
    Ok(())
}

#[test]
fn test_empty_store_round_trip() -> Result<()> {
    let dir = TempSourceDir::new()?;
    let path = dir.file_path("nested/db.json");
    Store::default().save(&path)?;
    assert!(Store::load(&path)?.is_empty());
    Ok(())
}
