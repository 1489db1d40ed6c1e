//! Configuration structures and loading logic.

use crate::config::license::License;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure.
///
/// Every section is optional; the defaults reproduce the fixed run constants
/// of the Better World Ed channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub channel: ChannelConfig,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Channel metadata registered once per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Channel display name, also the root folder of the archive.
    #[serde(default = "default_channel_name")]
    pub name: String,

    /// Channel's unique source id.
    #[serde(default = "default_source_id")]
    pub source_id: String,

    /// Who is providing the content.
    #[serde(default = "default_domain")]
    pub domain: String,

    /// Language code of the channel.
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Local path or URL of the channel thumbnail.
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            name: default_channel_name(),
            source_id: default_source_id(),
            domain: default_domain(),
            language: default_language(),
            description: None,
            thumbnail: None,
        }
    }
}

/// Spreadsheet input configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// CSV export of the overall database.
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
        }
    }
}

/// Archive output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where to write the zip. Defaults to `<cwd>/<channel name>.zip`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Conversion options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// License attached to every stored file.
    #[serde(default)]
    pub license: License,

    /// Copyright holder attached to every stored file.
    #[serde(default = "default_copyright_holder")]
    pub copyright_holder: String,

    /// Stop after this many data rows. `None` processes the whole sheet.
    #[serde(default)]
    pub row_limit: Option<usize>,

    /// Lower bound of the pause between downloads, in milliseconds.
    #[serde(default = "default_min_delay")]
    pub min_delay_ms: u64,

    /// Upper bound of the pause between downloads, in milliseconds.
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,

    /// Whether to show progress bars and per-file lines.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            license: License::default(),
            copyright_holder: default_copyright_holder(),
            row_limit: None,
            min_delay_ms: default_min_delay(),
            max_delay_ms: default_max_delay(),
            request_timeout_seconds: default_timeout(),
            show_progress: true,
        }
    }
}

fn default_channel_name() -> String {
    "Better World Ed".to_string()
}

fn default_source_id() -> String {
    "learningequality".to_string()
}

fn default_domain() -> String {
    "info@learningequality.org".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_input_path() -> PathBuf {
    PathBuf::from("bwe_overall_database.csv")
}

fn default_copyright_holder() -> String {
    "betterworlded".to_string()
}

fn default_min_delay() -> u64 {
    400
}

fn default_max_delay() -> u64 {
    750
}

fn default_timeout() -> u64 {
    120
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective archive location.
    pub fn output_path(&self) -> PathBuf {
        self.output.path.clone().unwrap_or_else(|| {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(format!("{}.zip", self.channel.name))
        })
    }
}
