//! Canned flight lines, sources and records.

use crate::record::FlightRecord;

/// A line that passes every check.
pub const VALID_LINE: &str = "AB12,JFK,LAX,2024-01-01 08:00,2024-01-01 10:00,100";

/// Same flight with departure and arrival swapped.
pub const REVERSED_TIMES_LINE: &str = "AB12,JFK,LAX,2024-01-01 10:00,2024-01-01 08:00,100";

/// Header line as written by schedule exports.
pub const HEADER_LINE: &str =
    "flight_id,origin,destination,departure_datetime,arrival_datetime,price";

/// Accepted lines paired with the record each one produces.
#[must_use]
pub fn sample_records() -> Vec<FlightRecord> {
    vec![
        flight("AB12", "JFK", "LAX", "2024-01-01 08:00", "2024-01-01 10:00", 100.0),
        flight("BA287", "LHR", "SFO", "2024-02-10 11:30", "2024-02-10 14:45", 612.5),
        flight("LH400", "FRA", "JFK", "2024-02-11 13:05", "2024-02-11 15:50", 489.0),
        flight("AB12", "JFK", "LAX", "2024-01-02 08:00", "2024-01-02 10:00", 150.0),
    ]
}

/// The CSV text of [`sample_records`], one line each, in the same order.
#[must_use]
pub fn sample_lines() -> Vec<String> {
    sample_records().iter().map(to_line).collect()
}

/// A source exercising every line category: header, valid, rejected, comment
/// and blank.
///
/// Ingesting it yields the first two [`sample_records`] and three error entries.
#[must_use]
pub fn mixed_source() -> String {
    let lines = sample_lines();
    [
        HEADER_LINE,
        lines[0].as_str(),
        "",
        "# winter timetable",
        REVERSED_TIMES_LINE,
        lines[1].as_str(),
        "XY9,JFK,LAX,2024-01-01 08:00",
    ]
    .join("\n")
}

/// Render a record back into its CSV line.
#[must_use]
pub fn to_line(r: &FlightRecord) -> String {
    format!(
        "{},{},{},{},{},{}",
        r.flight_id, r.origin, r.destination, r.departure_datetime, r.arrival_datetime, r.price
    )
}

/// Build a record without validation.
#[must_use]
pub fn flight(
    flight_id: &str,
    origin: &str,
    destination: &str,
    departure: &str,
    arrival: &str,
    price: f64,
) -> FlightRecord {
    FlightRecord {
        flight_id: flight_id.to_string(),
        origin: origin.to_string(),
        destination: destination.to_string(),
        departure_datetime: departure.to_string(),
        arrival_datetime: arrival.to_string(),
        price,
    }
}
