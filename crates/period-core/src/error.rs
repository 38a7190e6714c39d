//! Error types for period operations.
//!
//! This module defines [`PeriodError`] which covers all error cases that can occur
//! when converting dates between calendars, building periods, or parsing ISO period strings.

use thiserror::Error;

/// Errors that can occur during period operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    /// A date is not aligned with the start boundary of a period type.
    #[error("Invalid month {month} for {period_type}, expected one of {allowed:?}")]
    InvalidMonth {
        /// Name of the period type.
        period_type: &'static str,
        /// The month that was given.
        month: u32,
        /// Months a period of this type can start in.
        allowed: Vec<u32>,
    },

    /// Year, month and day do not form a valid date in the calendar.
    #[error("Invalid date {year:04}-{month:02}-{day:02} in calendar {calendar}")]
    InvalidDate {
        /// Calendar the date was checked against.
        calendar: &'static str,
        /// Year component.
        year: i32,
        /// Month component.
        month: u32,
        /// Day component.
        day: u32,
    },

    /// Date arithmetic left the range of representable dates.
    #[error("Date arithmetic out of range: {0}")]
    DateOutOfRange(String),

    /// The year is outside the range supported by a table-driven calendar.
    #[error("Year {year} is outside the supported range {min}..={max} of calendar {calendar}")]
    CalendarRange {
        /// Calendar name.
        calendar: &'static str,
        /// The requested year.
        year: i32,
        /// Smallest supported year.
        min: i32,
        /// Largest supported year.
        max: i32,
    },

    /// A string matched an ISO period pattern but could not be turned into a period.
    #[error("Malformed ISO period {iso:?}: {reason}")]
    MalformedIsoPeriod {
        /// The offending string.
        iso: String,
        /// What was wrong with it.
        reason: String,
    },

    /// No period type is registered under the given name.
    #[error("Unknown period type: {0}")]
    UnknownPeriodType(String),

    /// No relative period is known under the given name.
    #[error("Unknown relative period: {0}")]
    UnknownRelativePeriod(String),

    /// The period type does not implement the requested operation.
    #[error("{operation} is not supported for period type {period_type}")]
    NotSupported {
        /// Name of the period type.
        period_type: &'static str,
        /// The operation that was requested.
        operation: &'static str,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using [`PeriodError`].
pub type Result<T> = std::result::Result<T, PeriodError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_month_message_lists_allowed_months() {
        let err = PeriodError::InvalidMonth {
            period_type: "Quarterly",
            month: 2,
            allowed: vec![1, 4, 7, 10],
        };
        assert_eq!(
            err.to_string(),
            "Invalid month 2 for Quarterly, expected one of [1, 4, 7, 10]"
        );
    }

    #[test]
    fn test_invalid_date_message_is_zero_padded() {
        let err = PeriodError::InvalidDate {
            calendar: "iso8601",
            year: 2023,
            month: 2,
            day: 30,
        };
        assert_eq!(
            err.to_string(),
            "Invalid date 2023-02-30 in calendar iso8601"
        );
    }
}
