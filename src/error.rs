//! Error types for the bwe-souschef application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Input errors
    #[error("Cannot open input spreadsheet {path}: {source}")]
    Input {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // Output errors
    #[error("Cannot initialize output archive {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Conversion called out of order: expected {expected}, currently {actual}")]
    InvalidPhase {
        expected: &'static str,
        actual: &'static str,
    },

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    #[error("Unexpected content for {url}: expected {expected}, got {actual}")]
    UnexpectedContent {
        url: String,
        expected: String,
        actual: String,
    },

    // File system errors
    #[error("Invalid archive entry name: {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const CONFIG_ERROR: i32 = 2;
    pub const INPUT_ERROR: i32 = 3;
    pub const OUTPUT_ERROR: i32 = 4;
    pub const DOWNLOAD_ERROR: i32 = 5;
    pub const UNEXPECTED_ERROR: i32 = 6;
}

impl Error {
    /// Exit code reported to the shell when this error ends the run.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_)
            | Error::ConfigValidation { .. }
            | Error::MissingConfig(_)
            | Error::TomlParse(_) => exit_codes::CONFIG_ERROR,
            Error::Input { .. } | Error::Csv(_) => exit_codes::INPUT_ERROR,
            Error::Output { .. } | Error::Archive(_) | Error::InvalidFilename(_) => {
                exit_codes::OUTPUT_ERROR
            }
            Error::Download(_) | Error::UnexpectedContent { .. } | Error::Http(_) => {
                exit_codes::DOWNLOAD_ERROR
            }
            _ => exit_codes::UNEXPECTED_ERROR,
        }
    }
}
