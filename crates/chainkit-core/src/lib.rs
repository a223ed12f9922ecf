//! # ChainKit Core
//!
//! Core types and utilities shared by the ChainKit crates.
//! Provides the error taxonomy for chain layouts, length units,
//! and the shared container aliases used by the geometry caches.

pub mod error;
pub mod types;
pub mod units;

pub use error::ChainError;

pub use units::{format_length, get_unit_label, parse_length, MeasurementSystem, INCH, MM};

// Re-export type aliases for convenience
pub use types::{thread_safe_rw_map, ThreadSafeRwMap};
