//! HTTP content downloading.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use rand::Rng;
use reqwest::{header, Client};
use tokio::time::sleep;

use crate::config::OptionsConfig;
use crate::download::google::resolve_download_url;
use crate::download::source::ContentSource;
use crate::error::{Error, Result};
use crate::output::progress::create_download_bar;

/// Minimum body size to show a progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("bwe-souschef/", env!("CARGO_PKG_VERSION"));

/// Downloads resource bodies over HTTP, one request at a time.
pub struct HttpDownloader {
    client: Client,
    min_delay_ms: u64,
    max_delay_ms: u64,
    show_progress: bool,
}

impl HttpDownloader {
    /// Build a downloader from the run options.
    pub fn new(options: &OptionsConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(options.request_timeout_seconds))
            .build()
            .map_err(|e| Error::Download(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            min_delay_ms: options.min_delay_ms,
            max_delay_ms: options.max_delay_ms,
            show_progress: options.show_progress,
        })
    }

    /// Pause between requests so the hosts are not hammered.
    async fn polite_delay(&self) {
        if self.max_delay_ms == 0 {
            return;
        }
        let delay_ms = rand::thread_rng().gen_range(self.min_delay_ms..=self.max_delay_ms);
        sleep(Duration::from_millis(delay_ms)).await;
    }
}

#[async_trait]
impl ContentSource for HttpDownloader {
    async fn fetch(&self, url: &str, extension: &str) -> Result<Vec<u8>> {
        let resolved = resolve_download_url(url)?;
        if resolved != url {
            tracing::debug!("Resolved {} -> {}", url, resolved);
        }

        self.polite_delay().await;

        tracing::debug!("GET {}", resolved);
        let response = self.client.get(&resolved).send().await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);
        if !status.is_success() {
            return Err(Error::Download(format!("HTTP {} for {}", status, url)));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        check_content_type(url, extension, content_type.as_deref())?;

        let content_length = response.content_length();
        let progress = if self.show_progress
            && content_length.map(|l| l > PROGRESS_THRESHOLD).unwrap_or(false)
        {
            Some(create_download_bar(content_length.unwrap_or(0)))
        } else {
            None
        };

        let mut body = Vec::with_capacity(content_length.unwrap_or(0) as usize);
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
            body.extend_from_slice(&chunk);

            if let Some(ref pb) = progress {
                pb.set_position(body.len() as u64);
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        if body.is_empty() {
            return Err(Error::Download(format!("Empty response body for {}", url)));
        }

        Ok(body)
    }
}

/// Reject HTML pages served in place of a file.
///
/// Private Drive files and expired links answer with a sign-in page and a
/// 200 status.
pub fn check_content_type(url: &str, extension: &str, content_type: Option<&str>) -> Result<()> {
    let Some(actual) = content_type else {
        return Ok(());
    };

    let expected = mime_guess::from_ext(extension.trim_start_matches('.'))
        .first_raw()
        .unwrap_or("application/octet-stream");

    let is_html = actual.trim_start().to_lowercase().starts_with("text/html");
    if is_html && expected != "text/html" {
        return Err(Error::UnexpectedContent {
            url: url.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }

    Ok(())
}
