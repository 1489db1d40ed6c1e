//! Archive entry naming.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::sheet::cell::SLASH_REPLACEMENT;

/// Upper bound for collision suffixes.
const MAX_SUFFIX: u32 = 1000;

/// Sanitize one component of an archive entry name.
///
/// `/` becomes `|` like everywhere else in the tree; characters that most
/// extractors refuse are replaced with `_`.
pub fn sanitize_entry_component(name: &str) -> Result<String> {
    let sanitized: String = name
        .trim()
        .replace('/', SLASH_REPLACEMENT)
        .chars()
        .map(|c| match c {
            '\\' | ':' | '*' | '?' | '"' | '<' | '>' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return Err(Error::InvalidFilename(
            "Entry name cannot be empty or whitespace-only".to_string(),
        ));
    }

    // "." and ".." would escape the folder on extraction
    if sanitized.chars().all(|c| c == '.') {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    Ok(sanitized)
}

/// File name for a stored resource: sanitized title plus extension.
///
/// `extension` carries its leading dot; an empty extension is allowed.
pub fn entry_file_name(title: &str, extension: &str) -> Result<String> {
    let stem = sanitize_entry_component(title)?;
    Ok(format!("{}{}", stem, extension))
}

/// Tracks entry paths already written so repeated titles get `_1`, `_2`...
#[derive(Debug, Default)]
pub struct UniqueNames {
    taken: HashSet<String>,
}

impl UniqueNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a unique `dir/file_name` entry path and return it.
    pub fn claim(&mut self, dir: &str, file_name: &str) -> String {
        let first = join_entry(dir, file_name);
        if self.taken.insert(first.clone()) {
            return first;
        }

        let (stem, ext) = match file_name.rfind('.') {
            Some(pos) if pos > 0 => (&file_name[..pos], &file_name[pos..]),
            _ => (file_name, ""),
        };

        let mut counter = 1;
        loop {
            let candidate = join_entry(dir, &format!("{}_{}{}", stem, counter, ext));
            if self.taken.insert(candidate.clone()) || counter >= MAX_SUFFIX {
                return candidate;
            }
            counter += 1;
        }
    }
}

fn join_entry(dir: &str, file_name: &str) -> String {
    if dir.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", dir, file_name)
    }
}
