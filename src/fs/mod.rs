//! Filesystem module.
//!
//! Provides:
//! - Folder path resolution for each row
//! - Archive entry naming and de-duplication

pub mod naming;
pub mod paths;

pub use naming::{entry_file_name, sanitize_entry_component, UniqueNames};
pub use paths::{FolderPath, DEFAULT_GRADE_LEVEL};
