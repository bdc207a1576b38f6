//! The flight record and its timestamp format.
//!
//! A [`FlightRecord`] is only produced by the record validator in
//! [`validation`](crate::validation) or by loading a persisted store. Identifier,
//! airport codes and timestamps keep the trimmed text they were ingested with;
//! only the price is stored in parsed form.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Fixed layout of departure and arrival timestamps (`YYYY-MM-DD HH:MM`).
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A validated flight entry.
///
/// Field order matches the persisted store layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub flight_id: String,
    pub origin: String,
    pub destination: String,
    pub departure_datetime: String,
    pub arrival_datetime: String,
    pub price: f64,
}

impl FlightRecord {
    /// Departure as an instant, or `None` when the stored text does not parse.
    ///
    /// Records loaded from a store are not re-validated, so this can fail.
    #[must_use]
    pub fn departure(&self) -> Option<NaiveDateTime> {
        crate::validation::validators::parse_timestamp(&self.departure_datetime).ok()
    }

    /// Arrival as an instant, or `None` when the stored text does not parse.
    #[must_use]
    pub fn arrival(&self) -> Option<NaiveDateTime> {
        crate::validation::validators::parse_timestamp(&self.arrival_datetime).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FlightRecord {
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
    fn instants_parse_from_stored_text() {
        let r = sample();
        assert!(r.departure().unwrap() < r.arrival().unwrap());
    }

    #[test]
    fn unparseable_stored_text_yields_none() {
        let mut r = sample();
        r.arrival_datetime = "tomorrow".into();
        assert!(r.arrival().is_none());
        assert!(r.departure().is_some());
    }

    #[test]
    fn serializes_fields_in_store_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        let keys = [
            "flight_id",
            "origin",
            "destination",
            "departure_datetime",
            "arrival_datetime",
            "price",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
