//! CSV field parsing.
//!
//! Source files leave cells empty when a value was not reported. Parsers
//! return [`Field::Absent`] for those instead of inventing a zero, and an
//! error only when a non-empty cell is malformed.

use chrono::NaiveDate;

use crate::error::{CovidError, CovidResult};

/// Date format used by every source CSV.
pub const SOURCE_DATE_FORMAT: &str = "%d/%m/%Y";

/// Marker some vaccination rows carry in the date column instead of a date.
pub const REPORTING_SENTINEL: &str = "REPORTING";

/// A parsed CSV cell: either absent in the source or a parsed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<T> {
    Absent,
    Present(T),
}

impl<T> Field<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Absent => None,
            Field::Present(value) => Some(value),
        }
    }

    /// Require the value, turning absence into a parse error for `field`.
    pub fn required(self, field: &'static str) -> CovidResult<T> {
        match self {
            Field::Present(value) => Ok(value),
            Field::Absent => Err(CovidError::parse(field, "", "value is required")),
        }
    }
}

/// Parse an integer cell.
pub fn parse_int(field: &'static str, raw: &str) -> CovidResult<Field<i64>> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(Field::Absent);
    }
    value
        .parse::<i64>()
        .map(Field::Present)
        .map_err(|e| CovidError::parse(field, value, e))
}

/// Parse a floating point cell.
pub fn parse_float(field: &'static str, raw: &str) -> CovidResult<Field<f64>> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(Field::Absent);
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Field::Present(n)),
        Ok(_) => Err(CovidError::parse(field, value, "not a finite number")),
        Err(e) => Err(CovidError::parse(field, value, e)),
    }
}

/// Parse a `DD/MM/YYYY` cell.
pub fn parse_date(field: &'static str, raw: &str) -> CovidResult<Field<NaiveDate>> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(Field::Absent);
    }
    NaiveDate::parse_from_str(value, SOURCE_DATE_FORMAT)
        .map(Field::Present)
        .map_err(|e| CovidError::parse(field, value, e))
}

/// Parse a vaccination reporting date, where [`REPORTING_SENTINEL`] means no date.
pub fn parse_reporting_date(field: &'static str, raw: &str) -> CovidResult<Field<NaiveDate>> {
    if raw.trim() == REPORTING_SENTINEL {
        return Ok(Field::Absent);
    }
    parse_date(field, raw)
}
