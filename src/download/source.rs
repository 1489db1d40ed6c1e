//! Content sources the archive writer pulls file bodies from.

use async_trait::async_trait;

use crate::error::Result;

/// Fetches the body of a resource.
///
/// `extension` is the extension the body will be stored under (with its
/// leading dot) so a source can reject content of the wrong kind.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, url: &str, extension: &str) -> Result<Vec<u8>>;
}

/// In-memory source keyed by URL.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct StaticSource {
    bodies: std::collections::HashMap<String, Vec<u8>>,
}

#[cfg(test)]
impl StaticSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, url: &str, body: &[u8]) -> Self {
        self.bodies.insert(url.to_string(), body.to_vec());
        self
    }
}

#[cfg(test)]
#[async_trait]
impl ContentSource for StaticSource {
    async fn fetch(&self, url: &str, _extension: &str) -> Result<Vec<u8>> {
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| crate::error::Error::Download(format!("HTTP 404 Not Found: {}", url)))
    }
}
