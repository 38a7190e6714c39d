#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/periods/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Caching implementations for calendar period creation.
//!
//! This crate provides implementations of the [`PeriodCache`] trait from `period-core`:
//!
//! - [`InMemoryCache`] - Bounded, idle-expiring in-memory cache
//! - [`NoopCache`] - No-op cache that doesn't store anything

/// In-memory cache implementation.
pub mod memory;
/// No-op cache implementation.
pub mod noop;

// Re-export the trait for convenience
pub use period_core::{PeriodCache, PeriodKey};

// Re-export implementations
pub use memory::InMemoryCache;
pub use noop::NoopCache;
