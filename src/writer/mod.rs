//! Channel writer module.
//!
//! The row processor only talks to [`ChannelWriter`]. The concrete
//! [`ArchiveWriter`] builds the zip: folder tree, downloaded files and the
//! channel/content metadata sheets.

pub mod archive;
pub mod sheets;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::config::{ChannelConfig, License};
use crate::error::Result;

pub use archive::ArchiveWriter;
pub use sheets::{ChannelRecord, ContentRecord, CHANNEL_SHEET, CONTENT_SHEET};

/// Channel details registered once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMetadata {
    pub name: String,
    pub source_id: String,
    pub domain: String,
    pub language: String,
    pub description: Option<String>,
    /// Local path or URL.
    pub thumbnail: Option<String>,
}

impl From<&ChannelConfig> for ChannelMetadata {
    fn from(config: &ChannelConfig) -> Self {
        Self {
            name: config.name.clone(),
            source_id: config.source_id.clone(),
            domain: config.domain.clone(),
            language: config.language.clone(),
            description: config.description.clone(),
            thumbnail: config.thumbnail.clone(),
        }
    }
}

/// A file to fetch and store under a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Sanitized title, used as the file stem.
    pub title: String,
    pub source_url: String,
    /// Extension with its leading dot.
    pub extension: &'static str,
    pub license: License,
    pub copyright_holder: String,
}

/// Destination of the folder/file structure.
#[async_trait]
pub trait ChannelWriter: Send {
    /// Record channel metadata. Called once, before anything else.
    async fn register_channel(&mut self, channel: &ChannelMetadata) -> Result<()>;

    /// Create the folder at `path` (slash separated, ancestors implied) with
    /// `title` as its display name. Repeated calls for one path are harmless.
    async fn add_folder(&mut self, path: &str, title: &str) -> Result<()>;

    /// Fetch and store a file under `path`; returns the stored entry name.
    async fn add_file(&mut self, path: &str, file: &FileEntry) -> Result<String>;

    /// Write out everything and return the output location.
    async fn finalize(&mut self) -> Result<PathBuf>;
}
