//! In-memory writer that records every call.

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::config::License;
use crate::error::{Error, Result};
use crate::writer::{ChannelMetadata, ChannelWriter, FileEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    RegisterChannel {
        name: String,
    },
    AddFolder {
        path: String,
        title: String,
    },
    AddFile {
        path: String,
        title: String,
        url: String,
        extension: &'static str,
        license: License,
        copyright_holder: String,
    },
    Finalize,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingWriter {
    pub(crate) calls: Vec<Call>,
    failing_urls: HashSet<String>,
    failing_folders: HashSet<String>,
}

impl RecordingWriter {
    /// A writer whose `add_file` fails for `url`.
    pub(crate) fn failing_on(url: &str) -> Self {
        Self {
            failing_urls: HashSet::from([url.to_string()]),
            ..Default::default()
        }
    }

    /// A writer whose `add_folder` fails for `path`.
    pub(crate) fn failing_folder(path: &str) -> Self {
        Self {
            failing_folders: HashSet::from([path.to_string()]),
            ..Default::default()
        }
    }

    pub(crate) fn file_titles(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::AddFile { title, .. } => Some(title.as_str()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| predicate(c)).count()
    }
}

#[async_trait]
impl ChannelWriter for RecordingWriter {
    async fn register_channel(&mut self, channel: &ChannelMetadata) -> Result<()> {
        self.calls.push(Call::RegisterChannel {
            name: channel.name.clone(),
        });
        Ok(())
    }

    async fn add_folder(&mut self, path: &str, title: &str) -> Result<()> {
        if self.failing_folders.contains(path) {
            return Err(Error::InvalidFilename(format!("cannot create {}", path)));
        }
        self.calls.push(Call::AddFolder {
            path: path.to_string(),
            title: title.to_string(),
        });
        Ok(())
    }

    async fn add_file(&mut self, path: &str, file: &FileEntry) -> Result<String> {
        if self.failing_urls.contains(&file.source_url) {
            return Err(Error::Download(format!("HTTP 404 for {}", file.source_url)));
        }
        self.calls.push(Call::AddFile {
            path: path.to_string(),
            title: file.title.clone(),
            url: file.source_url.clone(),
            extension: file.extension,
            license: file.license,
            copyright_holder: file.copyright_holder.clone(),
        });
        Ok(format!("{}/{}{}", path, file.title, file.extension))
    }

    async fn finalize(&mut self) -> Result<PathBuf> {
        self.calls.push(Call::Finalize);
        Ok(PathBuf::from("memory.zip"))
    }
}
