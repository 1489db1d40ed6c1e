//! BWE Souschef - builds a channel archive from the Better World Ed spreadsheet.
//!
//! The overall database export has one row per math objective: a grade level
//! range, a math topic, the objective, and hyperlink formulas for a written
//! story, a video and a lesson plan. Each row becomes a
//! `grade level / math topic / objective` folder holding the downloaded
//! resources.
//!
//! # Example
//!
//! ```no_run
//! use bwe_souschef::{convert, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let summary = convert::driver::run(&config).await?;
//!     println!("Zip created at {}", summary.output.display());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod convert;
pub mod download;
pub mod error;
pub mod fs;
pub mod output;
pub mod sheet;
pub mod writer;

// Re-exports for convenience
pub use config::{Config, License};
pub use convert::{process_row, Conversion, RunPhase, RunStats};
pub use error::{Error, Result};
pub use fs::FolderPath;
pub use sheet::{ResourceKind, ResourceLink, Row};
pub use writer::{ArchiveWriter, ChannelMetadata, ChannelWriter, FileEntry};
