//! Run statistics and failure reports.

use std::fmt;

use crate::convert::row::RowReport;
use crate::sheet::{CellError, ResourceKind};

/// Why a resource of a row was not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The cell held no usable hyperlink.
    Cell(CellError),
    /// The writer could not fetch or store the file.
    Writer(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Cell(e) => write!(f, "{}", e),
            FailureReason::Writer(e) => write!(f, "{}", e),
        }
    }
}

/// A resource that was skipped, with enough context to find it in the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFailure {
    pub line: u64,
    pub kind: ResourceKind,
    /// Raw cell content.
    pub cell: String,
    pub reason: FailureReason,
}

impl fmt::Display for ResourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} skipped ({}) from: {}",
            self.line, self.kind, self.reason, self.cell
        )
    }
}

/// Totals for a whole run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub rows_processed: u64,
    pub stories: u64,
    pub videos: u64,
    pub lesson_plans: u64,
    /// Resource cells left blank in the sheet.
    pub empty_cells: u64,
    pub failures: Vec<ResourceFailure>,
}

impl RunStats {
    /// Fold a processed row into the totals.
    pub fn add_row(&mut self, report: RowReport) {
        self.rows_processed += 1;
        for (kind, _) in &report.files {
            self.increment_file(*kind);
        }
        self.empty_cells += report.empty_cells;
        self.failures.extend(report.failures);
    }

    /// Increment the counter for a stored resource.
    pub fn increment_file(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::WrittenStory => self.stories += 1,
            ResourceKind::Video => self.videos += 1,
            ResourceKind::LessonPlan => self.lesson_plans += 1,
        }
    }

    /// Get total stored file count.
    pub fn total_files(&self) -> u64 {
        self.stories + self.videos + self.lesson_plans
    }

    /// Failures caused by the writer rather than the sheet.
    pub fn writer_failures(&self) -> usize {
        self.failures
            .iter()
            .filter(|f| matches!(f.reason, FailureReason::Writer(_)))
            .count()
    }
}
