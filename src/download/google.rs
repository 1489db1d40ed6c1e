//! Google Docs and Drive link handling.
//!
//! The sheet links to the viewer pages of documents. Those pages are HTML, so
//! they are rewritten to the export or direct download endpoints before
//! fetching.

use url::Url;

use crate::error::Result;

/// Rewrite a viewer link to a URL that returns the file itself.
///
/// Links that are not Google Docs or Drive viewer links are returned
/// unchanged.
pub fn resolve_download_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw.trim())?;

    let host = url.host_str().unwrap_or_default();
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();

    let rewritten = match (host, segments.as_slice()) {
        ("docs.google.com", ["document", "d", id, ..]) => Some(format!(
            "https://docs.google.com/document/d/{}/export?format=pdf",
            id
        )),
        ("docs.google.com", ["presentation", "d", id, ..]) => Some(format!(
            "https://docs.google.com/presentation/d/{}/export/pdf",
            id
        )),
        ("drive.google.com", ["file", "d", id, ..]) => Some(drive_download(id)),
        ("drive.google.com", ["open"]) => url
            .query_pairs()
            .find(|(key, _)| key == "id")
            .map(|(_, id)| drive_download(&id)),
        _ => None,
    };

    Ok(rewritten.unwrap_or_else(|| url.to_string()))
}

fn drive_download(id: &str) -> String {
    format!("https://drive.google.com/uc?export=download&id={}", id)
}
