//! Run driver: channel registration, row streaming and finalization.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use csv::ReaderBuilder;

use crate::config::Config;
use crate::convert::row::{process_row, FileDefaults};
use crate::convert::stats::RunStats;
use crate::download::HttpDownloader;
use crate::error::{Error, Result};
use crate::output::progress::create_row_spinner;
use crate::sheet::Row;
use crate::writer::{ArchiveWriter, ChannelMetadata, ChannelWriter};

/// Where a conversion is in its lifecycle. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    NotStarted,
    ChannelRegistered,
    RowsProcessing,
    Finalized,
}

impl RunPhase {
    fn name(&self) -> &'static str {
        match self {
            RunPhase::NotStarted => "not started",
            RunPhase::ChannelRegistered => "channel registered",
            RunPhase::RowsProcessing => "rows processing",
            RunPhase::Finalized => "finalized",
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single pass over the sheet into one writer.
pub struct Conversion<W> {
    writer: W,
    phase: RunPhase,
    root: String,
    defaults: FileDefaults,
    row_limit: Option<usize>,
    show_progress: bool,
    stats: RunStats,
}

impl<W: ChannelWriter> Conversion<W> {
    pub fn new(writer: W, defaults: FileDefaults) -> Self {
        Self {
            writer,
            phase: RunPhase::NotStarted,
            root: String::new(),
            defaults,
            row_limit: None,
            show_progress: false,
            stats: RunStats::default(),
        }
    }

    /// Stop after `limit` data rows.
    pub fn with_row_limit(mut self, limit: Option<usize>) -> Self {
        self.row_limit = limit;
        self
    }

    /// Show a row spinner while processing.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    fn expect_phase(&self, expected: RunPhase) -> Result<()> {
        if self.phase != expected {
            return Err(Error::InvalidPhase {
                expected: expected.name(),
                actual: self.phase.name(),
            });
        }
        Ok(())
    }

    /// Register the channel. Must be the first call.
    pub async fn register_channel(&mut self, channel: &ChannelMetadata) -> Result<()> {
        self.expect_phase(RunPhase::NotStarted)?;
        self.writer.register_channel(channel).await?;
        self.root = channel.name.clone();
        self.phase = RunPhase::ChannelRegistered;
        Ok(())
    }

    /// Stream every data row of a CSV source through the row processor.
    ///
    /// The first record is the header and is skipped. Rows are handled one at
    /// a time in file order.
    pub async fn process_csv<R: Read>(&mut self, source: R) -> Result<&RunStats> {
        self.expect_phase(RunPhase::ChannelRegistered)?;
        self.phase = RunPhase::RowsProcessing;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let spinner = self
            .show_progress
            .then(|| create_row_spinner("Processing rows"));

        for (index, record) in reader.byte_records().enumerate() {
            if self.row_limit.is_some_and(|limit| index >= limit) {
                tracing::info!("Row limit of {} reached", index);
                break;
            }

            let row = Row::from_record(&record?);
            tracing::debug!("Processing line {}", row.line);

            let report = process_row(&mut self.writer, &row, &self.root, &self.defaults).await?;
            self.stats.add_row(report);

            if let Some(ref spinner) = spinner {
                spinner.inc(1);
            }
        }

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        Ok(&self.stats)
    }

    /// Finalize the writer and return the output location.
    pub async fn finalize(&mut self) -> Result<PathBuf> {
        self.expect_phase(RunPhase::RowsProcessing)?;
        let location = self.writer.finalize().await?;
        self.phase = RunPhase::Finalized;
        Ok(location)
    }

    pub fn into_stats(self) -> RunStats {
        self.stats
    }
}

/// Outcome of a complete run.
#[derive(Debug)]
pub struct RunSummary {
    pub output: PathBuf,
    pub stats: RunStats,
}

/// Convert the configured spreadsheet into the configured archive.
pub async fn run(config: &Config) -> Result<RunSummary> {
    let input_path = &config.input.path;
    let input = File::open(input_path).map_err(|source| Error::Input {
        path: input_path.display().to_string(),
        source,
    })?;

    let downloader = HttpDownloader::new(&config.options)?;
    let writer = ArchiveWriter::create(&config.output_path(), downloader)?;

    let mut conversion = Conversion::new(writer, FileDefaults::from(&config.options))
        .with_row_limit(config.options.row_limit)
        .with_progress(config.options.show_progress);

    conversion
        .register_channel(&ChannelMetadata::from(&config.channel))
        .await?;
    conversion.process_csv(input).await?;
    let output = conversion.finalize().await?;

    Ok(RunSummary {
        output,
        stats: conversion.into_stats(),
    })
}
