//! Spreadsheet module for reading the overall database export.
//!
//! Provides:
//! - Hyperlink formula cell parsing
//! - Positional row decoding and resource columns

pub mod cell;
pub mod row;

pub use cell::{folder_segment, parse_resource_link, sanitize_segment, CellError, ResourceLink};
pub use row::{ResourceKind, Row};
