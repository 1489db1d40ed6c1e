//! Conversion module: spreadsheet rows to channel folders and files.
//!
//! This module provides:
//! - The per-row processor
//! - The run driver and its phase tracking
//! - Run statistics and per-resource failure reports

pub mod driver;
pub mod row;
pub mod stats;

pub use driver::{Conversion, RunPhase};
pub use row::{process_row, FileDefaults, RowReport};
pub use stats::{FailureReason, ResourceFailure, RunStats};

#[cfg(test)]
pub(crate) mod testing;
