//! Tests for the query engine.

use anyhow::Result;
use flightbeam::testing::*;
use flightbeam::*;
use serde_json::{Value, json};

fn store() -> Store {
    Store::new(sample_records())
}

fn ids(result: &QueryResult) -> Vec<&str> {
    result.matches.iter().map(|r| r.flight_id.as_str()).collect()
}

#[test]
fn test_price_bound_example() {
    let single = Store::new(vec![validate_flight_row(VALID_LINE, 1).unwrap()]);
    let results = run_queries(
        &single,
        &[Query::new().with("price", 150), Query::new().with("price", 50)],
    );
    assert_eq!(results[0].matches.len(), 1);
    assert!(results[1].matches.is_empty());
}

#[test]
fn test_duplicates_kept_in_store_order() {
    let results = run_queries(&store(), &[Query::new().with("flight_id", "AB12")]);
    let departures: Vec<_> = results[0]
        .matches
        .iter()
        .map(|r| r.departure_datetime.as_str())
        .collect();
    assert_eq!(departures, vec!["2024-01-01 08:00", "2024-01-02 08:00"]);
}

#[test]
fn test_time_window() {
    let q = Query::new()
        .with("departure_datetime", "2024-02-01 00:00")
        .with("arrival_datetime", "2024-02-11 00:00");
    let results = run_queries(&store(), &[q]);
    assert_eq!(ids(&results[0]), vec!["BA287"]);
}

#[test]
fn test_extra_key_only_shrinks_matches() {
    let s = store();
    let base = Query::new().with("origin", "JFK");
    let narrowed = base.clone().with("price", 120);
    let impossible = base.clone().with("destination", "???");

    let results = run_queries(&s, &[base, narrowed, impossible]);
    assert_eq!(results[0].matches.len(), 2);
    assert_eq!(results[1].matches.len(), 1);
    assert!(results[2].matches.is_empty());
    for r in &results[1..] {
        assert!(r.matches.iter().all(|m| results[0].matches.contains(m)));
    }
}

#[test]
fn test_match_is_conjunction_of_independent_checks() {
    let s = store();
    let pairs = [
        ("origin", json!("JFK")),
        ("price", json!(500)),
        ("departure_datetime", json!("2024-01-02 00:00")),
    ];
    let mut combined = Query::new();
    for (k, v) in &pairs {
        combined = combined.with(*k, v.clone());
    }
    for record in s.records() {
        let each = pairs
            .iter()
            .all(|(k, v)| Query::new().with(*k, v.clone()).matches(record));
        assert_eq!(combined.matches(record), each, "{record:?}");
    }
}

#[test]
fn test_results_file_layout() -> Result<()> {
    let dir = TempSourceDir::new()?;
    let qpath = dir.add_source("q.json", r#"[{"origin": "LHR", "comment": "x"}, {"price": "abc"}]"#)?;
    let rpath = dir.file_path("out/response.json");

    let queries = load_queries(&qpath)?;
    save_results(&rpath, &run_queries(&store(), &queries))?;

    let doc: Value = serde_json::from_str(&std::fs::read_to_string(&rpath)?)?;
    assert_eq!(doc[0]["query"], json!({"origin": "LHR", "comment": "x"}));
    assert_eq!(doc[0]["matches"][0]["flight_id"], "BA287");
    assert_eq!(doc[1]["matches"], json!([]));
    Ok(())
}

#[test]
fn test_single_object_query_file() -> Result<()> {
    let dir = TempSourceDir::new()?;
    let qpath = dir.add_source("q.json", r#"{"destination": "JFK"}"#)?;
    let queries = load_queries(&qpath)?;
    assert_eq!(queries.len(), 1);
    assert_eq!(ids(&run_queries(&store(), &queries)[0]), vec!["LH400"]);
    Ok(())
}

#[test]
fn test_malformed_query_file_is_an_error() -> Result<()> {
    let dir = TempSourceDir::new()?;
    let qpath = dir.add_source("q.json", "{ not json")?;
    assert!(load_queries(&qpath).is_err());
    let qpath = dir.add_source("q2.json", "[1, 2]")?;
    assert!(load_queries(&qpath).is_err());
    Ok(())
}
