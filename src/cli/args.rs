//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, License};

/// Better World Ed channel builder CLI.
#[derive(Parser, Debug)]
#[command(
    name = "bwe-souschef",
    version,
    about = "Convert the Better World Ed spreadsheet export into a channel archive",
    long_about = "Reads the overall database CSV (grade level, math topic, objective and three \
                  resource links per row), downloads each written story, video and lesson plan, \
                  and packages them into a zip archive with channel and content metadata sheets."
)]
pub struct Args {
    /// CSV export of the overall database.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Where to write the zip archive.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "souschef.toml")]
    pub config: PathBuf,

    /// Only process the first N data rows.
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// License attached to every file (e.g. cc-by, cc-by-sa, public-domain).
    #[arg(long)]
    pub license: Option<License>,

    /// Copyright holder attached to every file.
    #[arg(long = "copyright-holder")]
    pub copyright_holder: Option<String>,

    /// Hide progress bars.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(input) = self.input {
            config.input.path = input;
        }

        if let Some(output) = self.output {
            config.output.path = Some(output);
        }

        if let Some(limit) = self.limit {
            config.options.row_limit = Some(limit);
        }

        if let Some(license) = self.license {
            config.options.license = license;
        }

        if let Some(holder) = self.copyright_holder {
            config.options.copyright_holder = holder;
        }

        if self.quiet {
            config.options.show_progress = false;
        }
    }
}
