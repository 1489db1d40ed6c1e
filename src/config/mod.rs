//! Configuration module for bwe-souschef.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - License identifiers attached to every stored file
//! - Configuration validation

pub mod license;
pub mod loader;
pub mod validation;

pub use license::License;
pub use loader::{ChannelConfig, Config, InputConfig, OptionsConfig, OutputConfig};
pub use validation::validate_config;
