//! Hyperlink formula cell parsing.
//!
//! Cells in the export are either plain text or a spreadsheet formula of the
//! form `=HYPERLINK("<url>","<title>")`. The parser looks only at the quoted
//! segments: a cell with exactly two of them is a link, anything else is not.

use thiserror::Error;

/// Replacement for `/` in folder and file titles.
pub const SLASH_REPLACEMENT: &str = "|";

/// A title/URL pair extracted from a hyperlink formula cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLink {
    pub url: String,
    pub title: String,
}

/// Why a resource cell produced no link.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellError {
    #[error("cell is empty")]
    Empty,

    #[error("expected a hyperlink formula with two quoted segments, found {segments}")]
    NotAHyperlink { segments: usize },

    #[error("hyperlink has an empty URL")]
    MissingUrl,

    #[error("hyperlink has an empty title")]
    MissingTitle,
}

/// Replace every `/` with `|` so a title never splits into extra path levels.
pub fn sanitize_segment(text: &str) -> String {
    text.replace('/', SLASH_REPLACEMENT)
}

/// Contents of each closed pair of double quotes, in order.
fn quoted_segments(cell: &str) -> Vec<&str> {
    let parts: Vec<&str> = cell.split('"').collect();
    let closed = parts.len() - 1;

    parts
        .iter()
        .enumerate()
        .filter(|(i, _)| i % 2 == 1 && *i < closed)
        .map(|(_, part)| *part)
        .collect()
}

/// Parse a hyperlink formula cell into its raw (unsanitized) URL and title.
///
/// Returns `None` unless the cell holds exactly two quoted segments.
pub fn parse_hyperlink(cell: &str) -> Option<ResourceLink> {
    match quoted_segments(cell).as_slice() {
        [url, title] => Some(ResourceLink {
            url: (*url).to_string(),
            title: (*title).to_string(),
        }),
        _ => None,
    }
}

/// Parse a resource column cell.
///
/// The title of a successful parse is already sanitized; both fields are
/// guaranteed non-blank.
pub fn parse_resource_link(cell: &str) -> Result<ResourceLink, CellError> {
    if cell.trim().is_empty() {
        return Err(CellError::Empty);
    }

    let link = parse_hyperlink(cell).ok_or_else(|| CellError::NotAHyperlink {
        segments: quoted_segments(cell).len(),
    })?;

    if link.url.trim().is_empty() {
        return Err(CellError::MissingUrl);
    }
    if link.title.trim().is_empty() {
        return Err(CellError::MissingTitle);
    }

    Ok(ResourceLink {
        url: link.url,
        title: sanitize_segment(&link.title),
    })
}

/// Resolve a folder path column: the link title when the cell is a hyperlink
/// formula, otherwise the raw text. `None` for blank cells.
pub fn folder_segment(cell: &str) -> Option<String> {
    if cell.trim().is_empty() {
        return None;
    }

    let text = match parse_hyperlink(cell) {
        Some(link) if !link.title.trim().is_empty() => link.title,
        _ => cell.to_string(),
    };

    Some(sanitize_segment(&text))
}
