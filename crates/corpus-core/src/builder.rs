//! Size-bounded corpus builder
//!
//! Source files are appended whole, one after another, until the output
//! reaches the target size. The size check only happens between files, so
//! the final corpus may overshoot the target by up to one file.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::decode::decode_lossy;
use crate::error::{CorpusError, Result};
use crate::markers::Markers;

/// Separator written between consecutive documents
pub const DELIMITER: &str = "\n\n==================================================\n\n";

const INPUT_SUFFIX: &str = ".txt";

/// Order in which directory entries are visited
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryOrder {
    /// Whatever order the filesystem enumeration yields
    FileSystem,
    /// Sorted by file name
    #[default]
    Name,
}

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub source_dir: PathBuf,
    pub output_path: PathBuf,
    pub target_size_bytes: u64,
    pub markers: Markers,
    pub order: EntryOrder,
}

impl BuildOptions {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        target_size_bytes: u64,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_path: output_path.into(),
            target_size_bytes,
            markers: Markers::default(),
            order: EntryOrder::default(),
        }
    }

    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_order(mut self, order: EntryOrder) -> Self {
        self.order = order;
        self
    }
}

/// Result of a corpus build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSummary {
    pub output_path: PathBuf,
    pub files_appended: usize,
    /// Input files left unread because the target was already reached
    pub files_skipped: usize,
    pub bytes_written: u64,
    pub target_size_bytes: u64,
    /// blake3 hex digest of the corpus bytes
    pub digest: String,
}

impl BuildSummary {
    pub fn size_mb(&self) -> f64 {
        self.bytes_written as f64 / (1024.0 * 1024.0)
    }

    pub fn target_reached(&self) -> bool {
        self.bytes_written >= self.target_size_bytes
    }
}

pub struct CorpusBuilder {
    options: BuildOptions,
}

impl CorpusBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build the corpus file, overwriting any existing output
    pub fn build(&self) -> Result<BuildSummary> {
        let options = &self.options;
        if options.target_size_bytes == 0 {
            return Err(CorpusError::InvalidOptions(
                "target size must be greater than zero".to_string(),
            ));
        }

        let output_path = &options.output_path;
        let file = File::create(output_path).map_err(|e| write_error(output_path, e))?;
        let mut writer = CorpusWriter::new(BufWriter::new(file));

        let inputs = self.list_inputs()?;
        let total = inputs.len();
        let mut files_appended = 0;
        let mut files_skipped = 0;

        for (index, path) in inputs.iter().enumerate() {
            if writer.written >= options.target_size_bytes {
                files_skipped = total - index;
                info!(
                    written = writer.written,
                    target = options.target_size_bytes,
                    skipped = files_skipped,
                    "Target size reached"
                );
                break;
            }

            let bytes = fs::read(path).map_err(|source| CorpusError::Read {
                path: path.clone(),
                source,
            })?;
            let content = decode_lossy(&bytes);
            let book = strip_book(options.markers.extract(&content));

            // Reaching here means the previous document left the size below target.
            if files_appended > 0 {
                writer
                    .append(DELIMITER)
                    .map_err(|e| write_error(output_path, e))?;
            }
            writer
                .append(book)
                .map_err(|e| write_error(output_path, e))?;
            files_appended += 1;
            debug!(file = %path.display(), bytes = book.len(), "Appended");
        }

        let digest = writer.finish().map_err(|e| write_error(output_path, e))?;
        let bytes_written = fs::metadata(output_path)
            .map_err(|e| write_error(output_path, e))?
            .len();

        info!(
            output = %output_path.display(),
            files = files_appended,
            bytes = bytes_written,
            "Corpus built"
        );

        Ok(BuildSummary {
            output_path: output_path.clone(),
            files_appended,
            files_skipped,
            bytes_written,
            target_size_bytes: options.target_size_bytes,
            digest,
        })
    }

    /// Collect `.txt` entries in the source directory.
    ///
    /// Entries that aren't readable files surface later as read errors.
    fn list_inputs(&self) -> Result<Vec<PathBuf>> {
        let source_dir = &self.options.source_dir;
        let dir_error = |source| CorpusError::SourceDir {
            path: source_dir.clone(),
            source,
        };

        // Never read the corpus back into itself
        let output = fs::canonicalize(&self.options.output_path).ok();

        let mut inputs = Vec::new();
        for entry in fs::read_dir(source_dir).map_err(dir_error)? {
            let entry = entry.map_err(dir_error)?;
            let path = entry.path();

            if !is_corpus_input(&entry.file_name().to_string_lossy()) {
                debug!(entry = %path.display(), "Skipping entry");
                continue;
            }
            if output.is_some() && fs::canonicalize(&path).ok() == output {
                continue;
            }
            inputs.push(path);
        }

        if self.options.order == EntryOrder::Name {
            inputs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        }

        Ok(inputs)
    }
}

/// Build a corpus with the default markers and name ordering.
///
/// Returns the output path.
pub fn build(
    source_dir: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    target_size_bytes: u64,
) -> Result<PathBuf> {
    let options = BuildOptions::new(
        source_dir.as_ref(),
        output_path.as_ref(),
        target_size_bytes,
    );
    let summary = CorpusBuilder::new(options).build()?;
    Ok(summary.output_path)
}

/// Whether a directory entry name is a corpus input (case-sensitive `.txt` suffix)
pub fn is_corpus_input(name: &str) -> bool {
    name.ends_with(INPUT_SUFFIX)
}

/// Trim whitespace, including the ASCII separators U+001C..=U+001F
fn strip_book(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c))
}

fn write_error(path: &Path, source: std::io::Error) -> CorpusError {
    CorpusError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Output sink that tracks the byte count and digest of everything written
struct CorpusWriter<W: Write> {
    inner: W,
    written: u64,
    hasher: blake3::Hasher,
}

impl<W: Write> CorpusWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            written: 0,
            hasher: blake3::Hasher::new(),
        }
    }

    fn append(&mut self, text: &str) -> std::io::Result<()> {
        self.inner.write_all(text.as_bytes())?;
        self.hasher.update(text.as_bytes());
        self.written += text.len() as u64;
        Ok(())
    }

    fn finish(mut self) -> std::io::Result<String> {
        self.inner.flush()?;
        Ok(self.hasher.finalize().to_hex().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_shape() {
        assert_eq!(DELIMITER, format!("\n\n{}\n\n", "=".repeat(50)));
    }

    #[test]
    fn test_corpus_input_suffix() {
        assert!(is_corpus_input("book.txt"));
        assert!(is_corpus_input("archive.tar.txt"));
        assert!(!is_corpus_input("book.TXT"));
        assert!(!is_corpus_input("book.txt.bak"));
        assert!(!is_corpus_input("notes.md"));
    }

    #[test]
    fn test_strip_book_matches_separators() {
        assert_eq!(strip_book("\u{1c}\u{1f} body\u{1d}\n\u{2003}"), "body");
        assert_eq!(strip_book("  inner\u{1e}text  "), "inner\u{1e}text");
        assert_eq!(strip_book("\u{1b}escaped"), "\u{1b}escaped");
    }

    #[test]
    fn test_writer_tracks_size_and_digest() {
        let mut writer = CorpusWriter::new(Vec::new());
        writer.append("Hello").unwrap();
        writer.append(" World").unwrap();
        assert_eq!(writer.written, 11);

        let expected = blake3::hash(b"Hello World").to_hex().to_string();
        assert_eq!(writer.finish().unwrap(), expected);
    }

    #[test]
    fn test_summary_helpers() {
        let summary = BuildSummary {
            output_path: PathBuf::from("out.txt"),
            files_appended: 2,
            files_skipped: 0,
            bytes_written: 3 * 1024 * 1024,
            target_size_bytes: 2 * 1024 * 1024,
            digest: String::new(),
        };
        assert!((summary.size_mb() - 3.0).abs() < f64::EPSILON);
        assert!(summary.target_reached());
    }

    #[test]
    fn test_zero_target_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let options = BuildOptions::new(dir.path(), dir.path().join("out.txt"), 0);
        let err = CorpusBuilder::new(options).build().unwrap_err();
        assert!(matches!(err, CorpusError::InvalidOptions(_)));
    }
}
