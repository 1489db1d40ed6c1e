//! Configuration validation logic.

use std::sync::LazyLock;

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;

/// ISO 639 style language code, optionally with a region or script suffix.
static LANGUAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2,3}(-[A-Za-z0-9]{2,8})?$").expect("valid regex"));

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_required("channel.name", &config.channel.name)?;
    validate_required("channel.source_id", &config.channel.source_id)?;
    validate_required("channel.domain", &config.channel.domain)?;
    validate_language(&config.channel.language)?;
    validate_copyright(config)?;
    validate_output(config)?;
    validate_delays(config.options.min_delay_ms, config.options.max_delay_ms)?;

    if config.options.row_limit == Some(0) {
        return Err(Error::ConfigValidation {
            field: "options.row_limit".to_string(),
            message: "Row limit must be at least 1 (omit it to process every row)".to_string(),
        });
    }

    Ok(())
}

fn validate_required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::MissingConfig(field.to_string()));
    }
    Ok(())
}

/// Validate the channel language code.
pub fn validate_language(language: &str) -> Result<()> {
    if language.is_empty() {
        return Err(Error::MissingConfig("channel.language".to_string()));
    }

    if !LANGUAGE_PATTERN.is_match(language) {
        return Err(Error::ConfigValidation {
            field: "channel.language".to_string(),
            message: format!(
                "'{}' is not a language code (expected something like 'en' or 'pt-BR')",
                language
            ),
        });
    }

    Ok(())
}

fn validate_copyright(config: &Config) -> Result<()> {
    if config.options.license.requires_copyright_holder()
        && config.options.copyright_holder.trim().is_empty()
    {
        return Err(Error::ConfigValidation {
            field: "options.copyright_holder".to_string(),
            message: format!("License '{}' requires a copyright holder", config.options.license),
        });
    }
    Ok(())
}

fn validate_output(config: &Config) -> Result<()> {
    let output = config.output_path();
    let is_zip = output
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("zip"))
        .unwrap_or(false);

    if !is_zip {
        return Err(Error::ConfigValidation {
            field: "output.path".to_string(),
            message: format!("Archive must have a .zip extension: {}", output.display()),
        });
    }
    Ok(())
}

/// Validate the download delay range.
pub fn validate_delays(min_ms: u64, max_ms: u64) -> Result<()> {
    if min_ms > max_ms {
        return Err(Error::ConfigValidation {
            field: "options.min_delay_ms".to_string(),
            message: format!(
                "Minimum delay ({} ms) is larger than maximum delay ({} ms)",
                min_ms, max_ms
            ),
        });
    }
    Ok(())
}
