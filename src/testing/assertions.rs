//! Assertions for ingestion and query outputs.

use crate::ingest::ErrorLog;
use crate::record::FlightRecord;
use crate::validation::{Reason, validate_flight_row};

/// Assert that two record sequences are equal in order and content.
///
/// # Panics
///
/// Panics with the first differing index if the sequences differ.
pub fn assert_records_equal(actual: &[FlightRecord], expected: &[FlightRecord]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Record count mismatch:\n  Expected: {expected:#?}\n  Actual: {actual:#?}"
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(a, e, "Record mismatch at index {i}");
    }
}

/// Assert that `line` is rejected and that `reason` is among the reasons.
///
/// # Panics
///
/// Panics if the line is accepted or the reason is missing.
///
/// # Example
///
/// ```
/// use flightbeam::testing::{assert_rejected_with, REVERSED_TIMES_LINE};
/// use flightbeam::validation::Reason;
///
/// assert_rejected_with(REVERSED_TIMES_LINE, Reason::ArrivalNotAfterDeparture);
/// ```
pub fn assert_rejected_with(line: &str, reason: Reason) {
    match validate_flight_row(line, 1) {
        Ok(record) => panic!("Expected rejection ({reason}) but got {record:?}\n  Line: {line}"),
        Err(rejection) => assert!(
            rejection.contains(reason),
            "Missing reason '{reason}'\n  Line: {line}\n  Reasons: {rejection}"
        ),
    }
}

/// Assert that the rendered error log equals `expected`, line by line.
///
/// # Panics
///
/// Panics if the logs differ.
pub fn assert_error_log(log: &ErrorLog, expected: &[&str]) {
    let actual = log.lines();
    assert_eq!(
        actual, expected,
        "Error log mismatch:\n  Expected: {expected:#?}\n  Actual: {actual:#?}"
    );
}
