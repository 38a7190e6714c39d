#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/periods/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Calendar-aligned reporting periods.
//!
//! This crate re-exports the core period types and cache implementations,
//! and provides a [`PeriodContext`] bundling the calendar, cache and
//! configuration used to create periods and resolve [`RelativePeriods`].

// Core types and traits
pub use period_core::*;

// Cache implementations
pub use period_cache::{InMemoryCache, NoopCache};

/// Configuration of a period context.
pub mod config;
/// Shared calendar, cache and settings for period operations.
pub mod context;
/// Relative period sets resolved against a reference date.
pub mod relative;

pub use config::{CacheConfig, CalendarKind, PeriodConfig};
pub use context::PeriodContext;
pub use relative::{FinancialYearStart, RelativePeriodEnum, RelativePeriods};
