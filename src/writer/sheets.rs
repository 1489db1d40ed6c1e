//! Metadata sheets stored next to the content in the archive.

use serde::Serialize;

use crate::error::{Error, Result};

/// Entry name of the channel sheet.
pub const CHANNEL_SHEET: &str = "Channel.csv";

/// Entry name of the content sheet.
pub const CONTENT_SHEET: &str = "Content.csv";

/// The single row of `Channel.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Source ID")]
    pub source_id: String,
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Thumbnail")]
    pub thumbnail: Option<String>,
}

/// One folder or file row of `Content.csv`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentRecord {
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Source ID")]
    pub source_id: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Author")]
    pub author: Option<String>,
    #[serde(rename = "Language")]
    pub language: Option<String>,
    #[serde(rename = "License ID")]
    pub license_id: Option<String>,
    #[serde(rename = "License Description")]
    pub license_description: Option<String>,
    #[serde(rename = "Copyright Holder")]
    pub copyright_holder: Option<String>,
    #[serde(rename = "Thumbnail")]
    pub thumbnail: Option<String>,
}

/// Serialize records into CSV bytes with a header row.
pub fn to_csv<T: Serialize>(records: &[T]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))
}
