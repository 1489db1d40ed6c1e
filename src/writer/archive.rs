//! Zip archive writer.

use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::download::ContentSource;
use crate::error::{Error, Result};
use crate::fs::{entry_file_name, sanitize_entry_component, UniqueNames};
use crate::writer::sheets::{to_csv, ChannelRecord, ContentRecord, CHANNEL_SHEET, CONTENT_SHEET};
use crate::writer::{ChannelMetadata, ChannelWriter, FileEntry};

/// Title of the stored channel thumbnail.
const THUMBNAIL_TITLE: &str = "Channel Thumbnail";

/// Writes the channel into a zip archive.
///
/// The archive is built in a `.part` file next to the output and only moved
/// into place by [`ChannelWriter::finalize`].
pub struct ArchiveWriter<S> {
    zip: Option<ZipWriter<File>>,
    part_path: PathBuf,
    output_path: PathBuf,
    source: S,
    folders: HashSet<String>,
    names: UniqueNames,
    channel: Option<ChannelRecord>,
    content: Vec<ContentRecord>,
}

impl<S: ContentSource> ArchiveWriter<S> {
    /// Open a new archive that will end up at `output_path`.
    pub fn create(output_path: &Path, source: S) -> Result<Self> {
        let output_error = |source: std::io::Error| Error::Output {
            path: output_path.display().to_string(),
            source,
        };

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(output_error)?;
        }

        let file_name = output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "channel.zip".to_string());
        let part_path =
            output_path.with_file_name(format!(".{}.{}.part", file_name, uuid::Uuid::new_v4()));

        let file = File::create(&part_path).map_err(output_error)?;
        tracing::debug!("Writing archive to {}", part_path.display());

        Ok(Self {
            zip: Some(ZipWriter::new(file)),
            part_path,
            output_path: output_path.to_path_buf(),
            source,
            folders: HashSet::new(),
            names: UniqueNames::new(),
            channel: None,
            content: Vec::new(),
        })
    }

    fn zip(&mut self) -> Result<&mut ZipWriter<File>> {
        self.zip.as_mut().ok_or(Error::InvalidPhase {
            expected: "open archive",
            actual: "finalized",
        })
    }

    /// Create directory entries for every level of `path`. Returns the levels
    /// that did not exist yet, outermost first.
    fn ensure_dirs(&mut self, path: &str) -> Result<Vec<String>> {
        let mut created = Vec::new();
        let mut current = String::new();

        for component in normalize_dir(path)?.split('/').filter(|c| !c.is_empty()) {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(component);

            if self.folders.insert(current.clone()) {
                let dir = current.clone();
                self.zip()?.add_directory(dir.as_str(), FileOptions::default())?;
                created.push(dir);
            }
        }

        Ok(created)
    }

    fn write_entry(&mut self, name: &str, extension: &str, body: &[u8]) -> Result<()> {
        write_entry(self.zip()?, name, extension, body)
    }

    /// Write the metadata sheets and the zip directory into the part file.
    fn seal(&self, zip: &mut ZipWriter<File>, channel: ChannelRecord) -> Result<()> {
        write_entry(zip, CHANNEL_SHEET, ".csv", &to_csv(&[channel])?)?;
        write_entry(zip, CONTENT_SHEET, ".csv", &to_csv(&self.content)?)?;

        let mut file = zip.finish()?;
        file.flush()?;
        Ok(())
    }
}

impl<S> ArchiveWriter<S> {
    fn discard_part(&self) {
        let _ = std::fs::remove_file(&self.part_path);
    }
}

fn write_entry(
    zip: &mut ZipWriter<File>,
    name: &str,
    extension: &str,
    body: &[u8],
) -> Result<()> {
    let options = FileOptions::default().compression_method(compression_for(extension));
    zip.start_file(name, options)?;
    zip.write_all(body)?;
    Ok(())
}

/// Sanitize each level of a slash separated folder path.
fn normalize_dir(path: &str) -> Result<String> {
    let levels = path
        .split('/')
        .filter(|c| !c.is_empty())
        .map(sanitize_entry_component)
        .collect::<Result<Vec<_>>>()?;
    Ok(levels.join("/"))
}

/// Read a thumbnail from disk, or fetch it when it is not a local file.
async fn load_thumbnail<S: ContentSource>(
    source: &S,
    location: &str,
    extension: &str,
) -> Result<Vec<u8>> {
    let local = Path::new(location);
    if local.is_file() {
        return Ok(tokio::fs::read(local).await?);
    }
    source.fetch(location, extension).await
}

/// Media containers are already compressed.
fn compression_for(extension: &str) -> CompressionMethod {
    match extension.to_lowercase().as_str() {
        ".mp4" | ".png" | ".jpg" | ".jpeg" => CompressionMethod::Stored,
        _ => CompressionMethod::Deflated,
    }
}

fn extension_of(location: &str) -> String {
    let without_query = location.split(['?', '#']).next().unwrap_or(location);
    Path::new(without_query)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_else(|| ".png".to_string())
}

#[async_trait]
impl<S: ContentSource> ChannelWriter for ArchiveWriter<S> {
    async fn register_channel(&mut self, channel: &ChannelMetadata) -> Result<()> {
        if self.channel.is_some() {
            return Err(Error::InvalidPhase {
                expected: "unregistered channel",
                actual: "channel registered",
            });
        }

        let root = sanitize_entry_component(&channel.name)?;
        self.ensure_dirs(&root)?;

        let thumbnail = match channel.thumbnail.as_deref() {
            Some(location) => {
                let extension = extension_of(location);
                let body = load_thumbnail(&self.source, location, &extension).await?;
                let file_name = entry_file_name(THUMBNAIL_TITLE, &extension)?;
                let entry = self.names.claim(&root, &file_name);
                self.write_entry(&entry, &extension, &body)?;
                Some(entry)
            }
            None => None,
        };

        self.channel = Some(ChannelRecord {
            title: channel.name.clone(),
            description: channel.description.clone(),
            domain: channel.domain.clone(),
            source_id: channel.source_id.clone(),
            language: channel.language.clone(),
            thumbnail,
        });

        tracing::info!("Registered channel '{}'", channel.name);
        Ok(())
    }

    async fn add_folder(&mut self, path: &str, title: &str) -> Result<()> {
        let created = self.ensure_dirs(path)?;
        let leaf = created.last().cloned();

        // The root level is the channel itself, not a content node
        for dir in created.into_iter().filter(|d| d.contains('/')) {
            let folder_title = if Some(&dir) == leaf.as_ref() {
                title.to_string()
            } else {
                dir.rsplit('/').next().unwrap_or(&dir).to_string()
            };
            self.content.push(ContentRecord {
                path: dir,
                title: folder_title,
                ..Default::default()
            });
        }

        Ok(())
    }

    async fn add_file(&mut self, path: &str, file: &FileEntry) -> Result<String> {
        let file_name = entry_file_name(&file.title, file.extension)?;

        let body = self.source.fetch(&file.source_url, file.extension).await?;

        let dir = normalize_dir(path)?;
        self.ensure_dirs(&dir)?;

        let entry = self.names.claim(&dir, &file_name);
        self.write_entry(&entry, file.extension, &body)?;

        self.content.push(ContentRecord {
            path: entry.clone(),
            title: file.title.clone(),
            source_id: Some(file.source_url.clone()),
            license_id: Some(file.license.id().to_string()),
            license_description: Some(file.license.description().to_string()),
            copyright_holder: Some(file.copyright_holder.clone()),
            ..Default::default()
        });

        tracing::debug!("Stored {} ({} bytes)", entry, body.len());
        Ok(entry)
    }

    async fn finalize(&mut self) -> Result<PathBuf> {
        let channel = self.channel.clone().ok_or(Error::InvalidPhase {
            expected: "channel registered",
            actual: "no channel",
        })?;

        // A failed finalize cannot be retried
        let mut zip = self.zip.take().ok_or(Error::InvalidPhase {
            expected: "open archive",
            actual: "finalized",
        })?;

        let sealed = self.seal(&mut zip, channel);
        drop(zip);
        if let Err(e) = sealed {
            self.discard_part();
            return Err(e);
        }

        if let Err(e) = tokio::fs::rename(&self.part_path, &self.output_path).await {
            self.discard_part();
            return Err(Error::Output {
                path: self.output_path.display().to_string(),
                source: e,
            });
        }

        Ok(self.output_path.clone())
    }
}

impl<S> Drop for ArchiveWriter<S> {
    fn drop(&mut self) {
        // Not finalized: do not leave a half-written archive around
        if self.zip.take().is_some() {
            self.discard_part();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::License;
    use crate::download::source::StaticSource;
    use std::io::Read;
    use zip::ZipArchive;

    fn channel() -> ChannelMetadata {
        ChannelMetadata {
            name: "Better World Ed".into(),
            source_id: "learningequality".into(),
            domain: "info@learningequality.org".into(),
            language: "en".into(),
            description: None,
            thumbnail: None,
        }
    }

    fn file(title: &str, url: &str, extension: &'static str) -> FileEntry {
        FileEntry {
            title: title.into(),
            source_url: url.into(),
            extension,
            license: License::CcBy,
            copyright_holder: "betterworlded".into(),
        }
    }

    fn read_entry(archive: &mut ZipArchive<File>, name: &str) -> String {
        let mut text = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        text
    }

    #[test]
    fn test_archive_layout_and_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("Better World Ed.zip");
        let source = StaticSource::new()
            .with("https://x.test/story", b"%PDF story")
            .with("https://x.test/video", b"mp4 bytes");

        let mut writer = ArchiveWriter::create(&output, source).unwrap();
        let result = tokio_test::block_on(async {
            writer.register_channel(&channel()).await?;
            let path = "Better World Ed/3-5/Fractions/Halves";
            writer.add_folder(path, "Halves").await?;
            let story = writer
                .add_file(path, &file("Story", "https://x.test/story", ".pdf"))
                .await?;
            let video = writer
                .add_file(path, &file("Story", "https://x.test/video", ".mp4"))
                .await?;
            let location = writer.finalize().await?;
            Ok::<_, Error>((story, video, location))
        });
        let (story, video, location) = result.unwrap();

        assert_eq!(story, "Better World Ed/3-5/Fractions/Halves/Story.pdf");
        assert_eq!(video, "Better World Ed/3-5/Fractions/Halves/Story.mp4");
        assert_eq!(location, output);

        let mut archive = ZipArchive::new(File::open(&output).unwrap()).unwrap();
        assert_eq!(read_entry(&mut archive, &story), "%PDF story");

        let content = read_entry(&mut archive, CONTENT_SHEET);
        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        let paths: Vec<&str> = rows.iter().map(|r| r.get(0).unwrap()).collect();
        assert_eq!(
            paths,
            vec![
                "Better World Ed/3-5",
                "Better World Ed/3-5/Fractions",
                "Better World Ed/3-5/Fractions/Halves",
                "Better World Ed/3-5/Fractions/Halves/Story.pdf",
                "Better World Ed/3-5/Fractions/Halves/Story.mp4",
            ]
        );
        assert_eq!(rows[3].get(6), Some("CC BY"));
        assert_eq!(rows[3].get(8), Some("betterworlded"));

        let channel_sheet = read_entry(&mut archive, CHANNEL_SHEET);
        assert!(channel_sheet.contains("Better World Ed,,info@learningequality.org,learningequality,en,"));
    }

    #[test]
    fn test_repeated_folder_and_duplicate_titles() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.zip");
        let source = StaticSource::new().with("https://x.test/a", b"a");

        let mut writer = ArchiveWriter::create(&output, source).unwrap();
        let entries = tokio_test::block_on(async {
            writer.register_channel(&channel()).await?;
            writer.add_folder("Better World Ed/Other/T/O", "O").await?;
            writer.add_folder("Better World Ed/Other/T/O", "O").await?;
            let first = writer
                .add_file("Better World Ed/Other/T/O", &file("A", "https://x.test/a", ".pdf"))
                .await?;
            let second = writer
                .add_file("Better World Ed/Other/T/O", &file("A", "https://x.test/a", ".pdf"))
                .await?;
            writer.finalize().await?;
            Ok::<_, Error>((first, second))
        })
        .unwrap();

        assert_eq!(entries.0, "Better World Ed/Other/T/O/A.pdf");
        assert_eq!(entries.1, "Better World Ed/Other/T/O/A_1.pdf");
    }

    #[test]
    fn test_failed_fetch_stores_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.zip");

        let mut writer = ArchiveWriter::create(&output, StaticSource::new()).unwrap();
        let err = tokio_test::block_on(async {
            writer.register_channel(&channel()).await?;
            writer
                .add_file("Better World Ed/Other/T/O", &file("A", "https://x.test/gone", ".pdf"))
                .await
        })
        .unwrap_err();
        assert!(matches!(err, Error::Download(_)));
        assert!(writer.content.is_empty());
    }

    #[test]
    fn test_unfinalized_archive_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.zip");

        let writer = ArchiveWriter::create(&output, StaticSource::new()).unwrap();
        let part = writer.part_path.clone();
        assert!(part.exists());
        drop(writer);

        assert!(!part.exists());
        assert!(!output.exists());
    }

    #[test]
    fn test_finalize_requires_channel() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer =
            ArchiveWriter::create(&dir.path().join("out.zip"), StaticSource::new()).unwrap();
        let err = tokio_test::block_on(writer.finalize()).unwrap_err();
        assert!(matches!(err, Error::InvalidPhase { .. }));
    }

    #[test]
    fn test_second_finalize_is_rejected_and_archive_kept() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.zip");

        let mut writer = ArchiveWriter::create(&output, StaticSource::new()).unwrap();
        tokio_test::block_on(async {
            writer.register_channel(&channel()).await?;
            writer.finalize().await
        })
        .unwrap();

        let err = tokio_test::block_on(writer.finalize()).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidPhase {
                actual: "finalized",
                ..
            }
        ));

        let mut archive = ZipArchive::new(File::open(&output).unwrap()).unwrap();
        assert!(archive.by_name(CHANNEL_SHEET).is_ok());
    }

    #[test]
    fn test_failed_rename_removes_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.zip");

        let mut writer = ArchiveWriter::create(&output, StaticSource::new()).unwrap();
        let part = writer.part_path.clone();

        // A non-empty directory in the way makes the rename fail
        std::fs::create_dir(&output).unwrap();
        std::fs::write(output.join("keep"), b"x").unwrap();

        let err = tokio_test::block_on(async {
            writer.register_channel(&channel()).await?;
            writer.finalize().await
        })
        .unwrap_err();
        assert!(matches!(err, Error::Output { .. }));
        assert!(!part.exists());

        let err = tokio_test::block_on(writer.finalize()).unwrap_err();
        assert!(matches!(err, Error::InvalidPhase { .. }));
    }

    #[test]
    fn test_local_thumbnail_is_stored() {
        let dir = tempfile::tempdir().unwrap();
        let thumb = dir.path().join("logo.png");
        std::fs::write(&thumb, b"png").unwrap();
        let output = dir.path().join("out.zip");

        let mut meta = channel();
        meta.thumbnail = Some(thumb.display().to_string());

        let mut writer = ArchiveWriter::create(&output, StaticSource::new()).unwrap();
        tokio_test::block_on(async {
            writer.register_channel(&meta).await?;
            writer.finalize().await
        })
        .unwrap();

        let mut archive = ZipArchive::new(File::open(&output).unwrap()).unwrap();
        assert_eq!(
            read_entry(&mut archive, "Better World Ed/Channel Thumbnail.png"),
            "png"
        );
        assert!(read_entry(&mut archive, CHANNEL_SHEET)
            .contains("Better World Ed/Channel Thumbnail.png"));
    }

    #[test]
    fn test_extension_of_thumbnail_locations() {
        assert_eq!(extension_of("https://x.test/logo.JPG?size=2"), ".jpg");
        assert_eq!(extension_of("/tmp/no_extension"), ".png");
    }
}
