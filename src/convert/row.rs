//! Per-row processing.

use crate::config::{License, OptionsConfig};
use crate::convert::stats::{FailureReason, ResourceFailure};
use crate::error::Result;
use crate::fs::FolderPath;
use crate::sheet::{parse_resource_link, CellError, ResourceKind, Row};
use crate::writer::{ChannelWriter, FileEntry};

/// License and copyright attached to every stored file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDefaults {
    pub license: License,
    pub copyright_holder: String,
}

impl From<&OptionsConfig> for FileDefaults {
    fn from(options: &OptionsConfig) -> Self {
        Self {
            license: options.license,
            copyright_holder: options.copyright_holder.clone(),
        }
    }
}

/// What happened to one row.
#[derive(Debug, Clone)]
pub struct RowReport {
    pub line: u64,
    pub folder: FolderPath,
    /// Stored resources with the writer's entry name, in column order.
    pub files: Vec<(ResourceKind, String)>,
    pub empty_cells: u64,
    pub failures: Vec<ResourceFailure>,
}

/// Create the row's folder and store each of its resources.
///
/// A resource that cannot be parsed or stored is recorded in the report and
/// the next one is tried. When the folder itself cannot be created, every
/// resource of the row is recorded as failed and the row is skipped.
pub async fn process_row<W: ChannelWriter + ?Sized>(
    writer: &mut W,
    row: &Row,
    root: &str,
    defaults: &FileDefaults,
) -> Result<RowReport> {
    let folder = FolderPath::resolve(row);
    let path = folder.render(root);
    tracing::debug!("Line {} -> {}", row.line, folder);

    let mut report = RowReport {
        line: row.line,
        folder,
        files: Vec::new(),
        empty_cells: 0,
        failures: Vec::new(),
    };

    if let Err(e) = writer.add_folder(&path, report.folder.leaf()).await {
        tracing::warn!("Failed to create folder {}: {}", path, e);
        for kind in ResourceKind::ALL {
            report.failures.push(ResourceFailure {
                line: row.line,
                kind,
                cell: row.resource(kind).to_string(),
                reason: FailureReason::Writer(format!("folder {}: {}", path, e)),
            });
        }
        return Ok(report);
    }

    for kind in ResourceKind::ALL {
        let cell = row.resource(kind);

        let link = match parse_resource_link(cell) {
            Ok(link) => link,
            Err(CellError::Empty) => {
                tracing::info!("Line {}: no {} link, skipping", row.line, kind);
                report.empty_cells += 1;
                continue;
            }
            Err(e) => {
                tracing::warn!("Error in extracting {} link from: {} ({})", kind, cell, e);
                report.failures.push(ResourceFailure {
                    line: row.line,
                    kind,
                    cell: cell.to_string(),
                    reason: FailureReason::Cell(e),
                });
                continue;
            }
        };

        tracing::info!("Adding {}: {}", kind, link.title);
        let entry = FileEntry {
            title: link.title,
            source_url: link.url,
            extension: kind.extension(),
            license: defaults.license,
            copyright_holder: defaults.copyright_holder.clone(),
        };

        match writer.add_file(&path, &entry).await {
            Ok(stored) => report.files.push((kind, stored)),
            Err(e) => {
                tracing::warn!("Failed to store {} {}: {}", kind, entry.source_url, e);
                report.failures.push(ResourceFailure {
                    line: row.line,
                    kind,
                    cell: cell.to_string(),
                    reason: FailureReason::Writer(e.to_string()),
                });
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::testing::{Call, RecordingWriter};

    fn defaults() -> FileDefaults {
        FileDefaults::from(&OptionsConfig::default())
    }

    fn full_row() -> Row {
        Row {
            line: 2,
            grade_level: "3-5".into(),
            math_topic: r#"=HYPERLINK("https://k.test/fractions","Fractions")"#.into(),
            objective: "Add fractions".into(),
            written_story: r#"=HYPERLINK("https://x.test/s","Story")"#.into(),
            video: r#"=HYPERLINK("https://x.test/v","I Am X // Y")"#.into(),
            lesson_plan: r#"=HYPERLINK("https://x.test/l","Plan")"#.into(),
            topic_tag: "ignored".into(),
        }
    }

    #[test]
    fn test_one_folder_then_three_files_in_column_order() {
        let mut writer = RecordingWriter::default();
        let report =
            tokio_test::block_on(process_row(&mut writer, &full_row(), "BWE", &defaults()))
                .unwrap();

        let path = "BWE/3-5/Fractions/Add fractions";
        assert_eq!(
            writer.calls,
            vec![
                Call::AddFolder {
                    path: path.into(),
                    title: "Add fractions".into()
                },
                Call::AddFile {
                    path: path.into(),
                    title: "Story".into(),
                    url: "https://x.test/s".into(),
                    extension: ".pdf",
                    license: License::CcBy,
                    copyright_holder: "betterworlded".into(),
                },
                Call::AddFile {
                    path: path.into(),
                    title: "I Am X || Y".into(),
                    url: "https://x.test/v".into(),
                    extension: ".mp4",
                    license: License::CcBy,
                    copyright_holder: "betterworlded".into(),
                },
                Call::AddFile {
                    path: path.into(),
                    title: "Plan".into(),
                    url: "https://x.test/l".into(),
                    extension: ".pdf",
                    license: License::CcBy,
                    copyright_holder: "betterworlded".into(),
                },
            ]
        );
        assert_eq!(report.files.len(), 3);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_malformed_cell_skips_only_that_resource() {
        let mut row = full_row();
        row.written_story = r#""""#.into();
        row.video = String::new();

        let mut writer = RecordingWriter::default();
        let report =
            tokio_test::block_on(process_row(&mut writer, &row, "BWE", &defaults())).unwrap();

        assert_eq!(writer.file_titles(), vec!["Plan"]);
        assert_eq!(report.empty_cells, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].kind, ResourceKind::WrittenStory);
        assert_eq!(report.failures[0].cell, r#""""#);
        assert_eq!(report.failures[0].line, 2);
    }

    #[test]
    fn test_writer_failure_is_reported_and_row_continues() {
        let mut writer = RecordingWriter::failing_on("https://x.test/v");
        let report =
            tokio_test::block_on(process_row(&mut writer, &full_row(), "BWE", &defaults()))
                .unwrap();

        assert_eq!(writer.file_titles(), vec!["Story", "Plan"]);
        assert_eq!(writer.count(|c| matches!(c, Call::AddFolder { .. })), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].kind, ResourceKind::Video);
        assert!(matches!(report.failures[0].reason, FailureReason::Writer(_)));
    }

    #[test]
    fn test_blank_grade_level_files_under_other() {
        let mut row = full_row();
        row.grade_level = String::new();

        let mut writer = RecordingWriter::default();
        let report =
            tokio_test::block_on(process_row(&mut writer, &row, "BWE", &defaults())).unwrap();

        assert_eq!(report.folder.grade_level, "Other");
        assert_eq!(
            writer.calls[0],
            Call::AddFolder {
                path: "BWE/Other/Fractions/Add fractions".into(),
                title: "Add fractions".into()
            }
        );
    }

    #[test]
    fn test_folder_failure_skips_row_without_error() {
        let mut writer = RecordingWriter::failing_folder("BWE/3-5/Fractions/Add fractions");
        let report =
            tokio_test::block_on(process_row(&mut writer, &full_row(), "BWE", &defaults()))
                .unwrap();

        assert!(writer.calls.is_empty());
        assert!(report.files.is_empty());
        assert_eq!(report.failures.len(), 3);
        assert_eq!(report.failures[1].kind, ResourceKind::Video);
        assert_eq!(
            report.failures[1].cell,
            r#"=HYPERLINK("https://x.test/v","I Am X // Y")"#
        );
    }
}
