//! Download module for resource bodies.
//!
//! This module provides:
//! - The content source seam used by the archive writer
//! - HTTP downloading with polite pacing
//! - Google Docs/Drive link resolution

pub mod google;
pub mod http;
pub mod source;

pub use google::resolve_download_url;
pub use http::HttpDownloader;
pub use source::ContentSource;
