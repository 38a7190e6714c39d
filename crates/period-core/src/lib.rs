#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/periods/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core calendar and period types.
//!
//! This crate provides the foundational abstractions for calendar-aligned periods:
//!
//! - [`Calendar`](calendar::Calendar) - Calendar systems and date arithmetic
//! - [`DateTimeUnit`](date_unit::DateTimeUnit) - Calendar-neutral date value
//! - [`Period`](period::Period) - A reporting period with its ISO identifier
//! - [`PeriodType`](period_type::PeriodType) - Period types, ISO encoding and generation
//! - [`PeriodCache`](cache::PeriodCache) - Caching abstraction

/// Cache trait and key for memoizing created periods.
pub mod cache;
/// Calendar systems (ISO-8601, Persian).
pub mod calendar;
/// Calendar-neutral date value.
pub mod date_unit;
/// Error types for period operations.
pub mod error;
/// Frequency metadata of period types.
pub mod frequency;
/// The period value type.
pub mod period;
/// Period types and their operations.
pub mod period_type;
/// Period type catalog and ISO period detection.
pub mod registry;

// Re-export commonly used items at crate root
pub use cache::{PeriodCache, PeriodKey};
pub use calendar::{Calendar, Iso8601Calendar, PersianCalendar};
pub use date_unit::DateTimeUnit;
pub use error::{PeriodError, Result};
pub use period::Period;
pub use period_type::PeriodType;
