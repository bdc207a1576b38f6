//! Field validators and the per-line record validator.
//!
//! This module turns one raw delimited line into either a [`FlightRecord`] or a
//! [`RowRejection`] listing every reason the line was refused.
//!
//! # Overview
//!
//! - **Field validators** ([`validators`]) - pure predicates and parsers for a
//!   single field (identifier, airport code, timestamp, price)
//! - **Reasons** ([`Reason`]) - closed set of human-readable rejection reasons
//! - **Record validator** ([`validate_flight_row`]) - splits the line, runs every
//!   field validator, checks the departure/arrival ordering and collects all
//!   failures instead of stopping at the first one
//!
//! # Example
//!
//! ```
//! use flightbeam::validation::*;
//!
//! let ok = validate_flight_row("AB12,JFK,LAX,2024-01-01 08:00,2024-01-01 10:00,100", 1);
//! assert_eq!(ok.unwrap().price, 100.0);
//!
//! let bad = validate_flight_row("A,jfk,LAX,2024-01-01 08:00,2024-01-01 10:00,0", 2);
//! assert_eq!(
//!     bad.unwrap_err().to_string(),
//!     "invalid flight_id; invalid origin; price must be positive"
//! );
//! ```

use crate::record::{DATE_FORMAT, FlightRecord};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Number of comma-separated fields in a flight line.
pub const FIELD_COUNT: usize = 6;

/// Result of validating one line.
pub type RowResult = Result<FlightRecord, RowRejection>;

/// One reason a line was rejected.
///
/// The display text is what ends up in the error log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Reason {
    #[error("missing required fields")]
    MissingFields,
    #[error("invalid flight_id")]
    InvalidFlightId,
    #[error("invalid origin")]
    InvalidOrigin,
    #[error("invalid destination")]
    InvalidDestination,
    #[error("invalid departure_datetime")]
    InvalidDeparture,
    #[error("invalid arrival_datetime")]
    InvalidArrival,
    #[error("invalid price")]
    InvalidPrice,
    #[error("price must be positive")]
    NonPositivePrice,
    #[error("arrival must be after departure")]
    ArrivalNotAfterDeparture,
}

/// Broad category of a [`FieldError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// The text does not have the required shape.
    Format,
    /// The text parsed but its value is out of range.
    Value,
}

/// Failure of a parsing field validator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("'{0}' does not match {fmt}", fmt = DATE_FORMAT)]
    Format(String),
    #[error("'{0}' is not a finite number")]
    NotNumeric(String),
    #[error("price must be positive")]
    NotPositive(f64),
}

impl FieldError {
    #[must_use]
    pub fn kind(&self) -> FieldErrorKind {
        match self {
            Self::Format(_) => FieldErrorKind::Format,
            Self::NotNumeric(_) | Self::NotPositive(_) => FieldErrorKind::Value,
        }
    }
}

/// The ordered reasons a line was refused.
///
/// Displays as the reasons joined with `"; "`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRejection {
    reasons: Vec<Reason>,
}

impl RowRejection {
    fn new(reasons: Vec<Reason>) -> Self {
        Self { reasons }
    }

    /// Reasons in the order they were detected.
    #[must_use]
    pub fn reasons(&self) -> &[Reason] {
        &self.reasons
    }

    #[must_use]
    pub fn contains(&self, reason: Reason) -> bool {
        self.reasons.contains(&reason)
    }
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, reason) in self.reasons.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{reason}")?;
        }
        Ok(())
    }
}

impl std::error::Error for RowRejection {}

/// Single-field validators.
pub mod validators {
    use super::FieldError;
    use crate::record::DATE_FORMAT;
    use chrono::NaiveDateTime;
    use regex::Regex;
    use std::sync::LazyLock;

    static TIMESTAMP_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}$").expect("valid timestamp regex")
    });

    /// Letters and digits only, 2 to 8 characters.
    #[must_use]
    pub fn validate_identifier(value: &str) -> bool {
        let len = value.chars().count();
        (2..=8).contains(&len) && value.chars().all(char::is_alphanumeric)
    }

    /// Exactly three uppercase letters.
    #[must_use]
    pub fn validate_airport_code(value: &str) -> bool {
        value.chars().count() == 3
            && value
                .chars()
                .all(|c| c.is_alphabetic() && c.is_uppercase())
    }

    /// Parse a `YYYY-MM-DD HH:MM` timestamp.
    ///
    /// The whole string must match; unpadded components, seconds or trailing
    /// text are rejected, as are impossible calendar dates.
    ///
    /// # Errors
    /// Returns [`FieldError::Format`] when the text does not match.
    pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, FieldError> {
        if !TIMESTAMP_SHAPE.is_match(value) {
            return Err(FieldError::Format(value.to_string()));
        }
        NaiveDateTime::parse_from_str(value, DATE_FORMAT)
            .map_err(|_| FieldError::Format(value.to_string()))
    }

    /// Parse a strictly positive, finite price.
    ///
    /// # Errors
    /// Returns [`FieldError::NotNumeric`] for text that is not a finite number and
    /// [`FieldError::NotPositive`] for zero or negative values.
    pub fn validate_price(value: &str) -> Result<f64, FieldError> {
        let price: f64 = value
            .parse()
            .map_err(|_| FieldError::NotNumeric(value.to_string()))?;
        if !price.is_finite() {
            return Err(FieldError::NotNumeric(value.to_string()));
        }
        if price <= 0.0 {
            return Err(FieldError::NotPositive(price));
        }
        Ok(price)
    }
}

/// Validate one comma-delimited flight line.
///
/// `line_number` is only used for diagnostics. A wrong field count short-circuits
/// with [`Reason::MissingFields`]; otherwise every field is checked and all
/// failures are returned together. The arrival/departure ordering is only checked
/// when both timestamps parsed.
///
/// # Errors
/// Returns a [`RowRejection`] with at least one reason when the line is invalid.
pub fn validate_flight_row(line: &str, line_number: usize) -> RowResult {
    use validators::*;

    let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    let [flight_id, origin, destination, departure, arrival, price] = fields[..] else {
        debug!(line_number, found = fields.len(), "wrong field count");
        return Err(RowRejection::new(vec![Reason::MissingFields]));
    };

    let mut reasons = Vec::new();

    if !validate_identifier(flight_id) {
        reasons.push(Reason::InvalidFlightId);
    }
    if !validate_airport_code(origin) {
        reasons.push(Reason::InvalidOrigin);
    }
    if !validate_airport_code(destination) {
        reasons.push(Reason::InvalidDestination);
    }

    let dep = parse_timestamp(departure).ok();
    if dep.is_none() {
        reasons.push(Reason::InvalidDeparture);
    }
    let arr = parse_timestamp(arrival).ok();
    if arr.is_none() {
        reasons.push(Reason::InvalidArrival);
    }

    let parsed_price = match validate_price(price) {
        Ok(p) => Some(p),
        Err(FieldError::NotPositive(_)) => {
            reasons.push(Reason::NonPositivePrice);
            None
        }
        Err(_) => {
            reasons.push(Reason::InvalidPrice);
            None
        }
    };

    if let (Some(dep), Some(arr)) = (dep, arr)
        && arr <= dep
    {
        reasons.push(Reason::ArrivalNotAfterDeparture);
    }

    match parsed_price {
        Some(price) if reasons.is_empty() => Ok(FlightRecord {
            flight_id: flight_id.to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_datetime: departure.to_string(),
            arrival_datetime: arrival.to_string(),
            price,
        }),
        _ => {
            debug!(line_number, ?reasons, "line rejected");
            Err(RowRejection::new(reasons))
        }
    }
}
