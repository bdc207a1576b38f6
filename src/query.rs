//! Ad-hoc filter queries over a [`Store`].
//!
//! A [`Query`] is a JSON object whose recognized keys each add one constraint;
//! a record matches when it satisfies all of them. Unrecognized keys are kept
//! (they are echoed back in the results) but impose nothing.
//!
//! | key                  | strategy                                   |
//! |----------------------|--------------------------------------------|
//! | `flight_id`          | exact string equality                      |
//! | `origin`             | exact string equality                      |
//! | `destination`        | exact string equality                      |
//! | `price`              | record price at most the query price       |
//! | `departure_datetime` | record departs at or after the query time  |
//! | `arrival_datetime`   | record arrives at or before the query time |
//!
//! A value that cannot be compared (a non-numeric price, a timestamp that does
//! not parse on either side, a non-string for a string field) makes the record
//! a non-match rather than an error.
//!
//! ```
//! use flightbeam::query::{Query, run_queries};
//! use flightbeam::store::Store;
//! use flightbeam::validation::validate_flight_row;
//!
//! let rec = validate_flight_row("AB12,JFK,LAX,2024-01-01 08:00,2024-01-01 10:00,100", 1).unwrap();
//! let store = Store::new(vec![rec]);
//! let results = run_queries(&store, &[Query::new().with("price", 150), Query::new().with("price", 50)]);
//! assert_eq!(results[0].matches.len(), 1);
//! assert!(results[1].matches.is_empty());
//! ```

use crate::io::json::{read_json, write_json_pretty};
use crate::record::FlightRecord;
use crate::store::Store;
use crate::validation::validators::parse_timestamp;
use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info};

/// Record fields a query can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryField {
    FlightId,
    Origin,
    Destination,
    Price,
    DepartureDatetime,
    ArrivalDatetime,
}

/// How a query value is compared against a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Strings must be equal.
    Exact,
    /// Record value must be `<=` the query value.
    AtMost,
    /// Record instant must be `>=` the query instant.
    NotBefore,
    /// Record instant must be `<=` the query instant.
    NotAfter,
}

impl QueryField {
    pub const ALL: [Self; 6] = [
        Self::FlightId,
        Self::Origin,
        Self::Destination,
        Self::Price,
        Self::DepartureDatetime,
        Self::ArrivalDatetime,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::FlightId => "flight_id",
            Self::Origin => "origin",
            Self::Destination => "destination",
            Self::Price => "price",
            Self::DepartureDatetime => "departure_datetime",
            Self::ArrivalDatetime => "arrival_datetime",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    #[must_use]
    pub fn comparison(self) -> Comparison {
        match self {
            Self::FlightId | Self::Origin | Self::Destination => Comparison::Exact,
            Self::Price => Comparison::AtMost,
            Self::DepartureDatetime => Comparison::NotBefore,
            Self::ArrivalDatetime => Comparison::NotAfter,
        }
    }

    /// Whether `record` satisfies this field's constraint for `target`.
    #[must_use]
    pub fn accepts(self, record: &FlightRecord, target: &Value) -> bool {
        match self.comparison() {
            Comparison::Exact => {
                let field = match self {
                    Self::FlightId => &record.flight_id,
                    Self::Origin => &record.origin,
                    _ => &record.destination,
                };
                target.as_str() == Some(field.as_str())
            }
            Comparison::AtMost => match as_number(target) {
                Some(bound) if record.price.is_finite() => record.price <= bound,
                _ => false,
            },
            Comparison::NotBefore => match (record.departure(), as_instant(target)) {
                (Some(dep), Some(bound)) => dep >= bound,
                _ => false,
            },
            Comparison::NotAfter => match (record.arrival(), as_instant(target)) {
                (Some(arr), Some(bound)) => arr <= bound,
                _ => false,
            },
        }
    }
}

fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn as_instant(value: &Value) -> Option<NaiveDateTime> {
    parse_timestamp(value.as_str()?).ok()
}

/// A partial-match predicate over flight records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query {
    fields: Map<String, Value>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// The query object as given, unrecognized keys included.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Recognized keys present in this query, with their target values.
    pub fn constraints(&self) -> impl Iterator<Item = (QueryField, &Value)> {
        QueryField::ALL
            .into_iter()
            .filter_map(|f| self.fields.get(f.key()).map(|v| (f, v)))
    }

    #[must_use]
    pub fn matches(&self, record: &FlightRecord) -> bool {
        self.constraints()
            .all(|(field, target)| field.accepts(record, target))
    }
}

impl From<Map<String, Value>> for Query {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// A query and every store record it matched, in store order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub query: Query,
    pub matches: Vec<FlightRecord>,
}

/// Evaluate one query against every record.
#[must_use]
pub fn run_query(store: &Store, query: &Query) -> QueryResult {
    let matches: Vec<FlightRecord> = store
        .records()
        .iter()
        .filter(|r| query.matches(r))
        .cloned()
        .collect();
    debug!(matches = matches.len(), "query evaluated");
    QueryResult {
        query: query.clone(),
        matches,
    }
}

/// Evaluate each query independently, preserving query order.
#[must_use]
pub fn run_queries(store: &Store, queries: &[Query]) -> Vec<QueryResult> {
    queries.iter().map(|q| run_query(store, q)).collect()
}

/// Turn a decoded query document into queries.
///
/// A single object is one query; an array must contain only objects.
///
/// # Errors
/// Returns an error for any other document shape.
pub fn queries_from_value(doc: Value) -> Result<Vec<Query>> {
    match doc {
        Value::Object(fields) => Ok(vec![Query::from(fields)]),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(fields) => Ok(Query::from(fields)),
                other => bail!("query #{} is not an object: {other}", i + 1),
            })
            .collect(),
        other => bail!("query document must be an object or an array, got {other}"),
    }
}

/// Load a query file holding one object or an array of objects.
///
/// # Errors
/// Returns an error if the file is missing, is not JSON, or has the wrong shape.
pub fn load_queries(path: impl AsRef<Path>) -> Result<Vec<Query>> {
    let path = path.as_ref();
    let doc: Value = read_json(path)?;
    queries_from_value(doc).with_context(|| format!("load queries from {}", path.display()))
}

/// Write query results as an indented JSON array.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn save_results(path: impl AsRef<Path>, results: &[QueryResult]) -> Result<()> {
    let path = path.as_ref();
    write_json_pretty(path, results)?;
    info!(path = %path.display(), queries = results.len(), "saved query results");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> FlightRecord {
        FlightRecord {
            flight_id: "AB12".into(),
            origin: "JFK".into(),
            destination: "LAX".into(),
            departure_datetime: "2024-01-01 08:00".into(),
            arrival_datetime: "2024-01-01 10:00".into(),
            price: 100.0,
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(Query::new().matches(&record()));
    }

    #[test]
    fn string_fields_are_exact() {
        let r = record();
        assert!(Query::new().with("origin", "JFK").matches(&r));
        assert!(!Query::new().with("origin", "jfk").matches(&r));
        assert!(!Query::new().with("flight_id", 12).matches(&r));
        assert!(Query::new().with("destination", "LAX").with("flight_id", "AB12").matches(&r));
    }

    #[test]
    fn price_is_an_upper_bound() {
        let r = record();
        assert!(Query::new().with("price", 100).matches(&r));
        assert!(Query::new().with("price", "150.5").matches(&r));
        assert!(!Query::new().with("price", 99.99).matches(&r));
        assert!(!Query::new().with("price", "cheap").matches(&r));
        assert!(!Query::new().with("price", Value::Null).matches(&r));
    }

    #[test]
    fn departure_is_a_lower_bound() {
        let r = record();
        assert!(Query::new().with("departure_datetime", "2024-01-01 08:00").matches(&r));
        assert!(Query::new().with("departure_datetime", "2023-12-31 23:59").matches(&r));
        assert!(!Query::new().with("departure_datetime", "2024-01-01 08:01").matches(&r));
        assert!(!Query::new().with("departure_datetime", "2024-01-01").matches(&r));
    }

    #[test]
    fn arrival_is_an_upper_bound() {
        let r = record();
        assert!(Query::new().with("arrival_datetime", "2024-01-01 10:00").matches(&r));
        assert!(!Query::new().with("arrival_datetime", "2024-01-01 09:59").matches(&r));
    }

    #[test]
    fn unparseable_record_timestamp_is_a_non_match() {
        let mut r = record();
        r.departure_datetime = "whenever".into();
        assert!(!Query::new().with("departure_datetime", "2020-01-01 00:00").matches(&r));
        assert!(Query::new().with("arrival_datetime", "2030-01-01 00:00").matches(&r));
    }

    #[test]
    fn unknown_keys_are_ignored_but_kept() {
        let q = Query::new().with("airline", "Nowhere Air");
        assert!(q.matches(&record()));
        assert_eq!(q.constraints().count(), 0);
        assert_eq!(q.fields().len(), 1);
    }

    #[test]
    fn strategies_by_field() {
        assert_eq!(QueryField::from_key("price"), Some(QueryField::Price));
        assert_eq!(QueryField::from_key("Price"), None);
        assert_eq!(QueryField::Origin.comparison(), Comparison::Exact);
        assert_eq!(QueryField::DepartureDatetime.comparison(), Comparison::NotBefore);
        assert_eq!(QueryField::ArrivalDatetime.comparison(), Comparison::NotAfter);
    }

    #[test]
    fn query_document_shapes() {
        assert_eq!(queries_from_value(json!({"origin": "JFK"})).unwrap().len(), 1);
        assert_eq!(queries_from_value(json!([{}, {"price": 1}])).unwrap().len(), 2);
        assert!(queries_from_value(json!([{}, 3])).is_err());
        assert!(queries_from_value(json!("origin")).is_err());
    }

    #[test]
    fn result_serializes_query_verbatim() {
        let q = Query::new().with("price", 150).with("note", "x");
        let store = Store::new(vec![record()]);
        let out = serde_json::to_value(run_query(&store, &q)).unwrap();
        assert_eq!(out["query"], json!({"price": 150, "note": "x"}));
        assert_eq!(out["matches"][0]["flight_id"], "AB12");
    }
}
