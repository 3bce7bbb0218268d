//! Importing runs from delimited text files.
//!
//! Each line of an import holds one `distance,duration[,date]` run. Imports
//! are fail-fast: the first invalid line stops the import, but the runs read
//! before it stay in the collection.

use std::{
    ffi::OsStr,
    fmt, io,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};

use crate::domain::{RunCollection, RunRecordParser, ValidationError};

/// The declared format of an import file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// Comma-separated values (`.csv`).
    Csv,
    /// Plain text (`.txt`).
    PlainText,
}

impl ContentType {
    /// Infers the content type from a file extension (case-insensitive).
    ///
    /// Returns `None` for anything that is neither CSV nor plain text.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension().and_then(OsStr::to_str)?;
        if extension.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if extension.eq_ignore_ascii_case("txt") {
            Some(Self::PlainText)
        } else {
            None
        }
    }

    /// The MIME type of this content type.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::PlainText => "text/plain",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// Errors that can occur while importing runs.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The file is not CSV or plain text.
    #[error("{} is not a CSV or plain text file", .0.display())]
    UnsupportedContentType(PathBuf),

    /// The file could not be read as UTF-8 text.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// A line failed validation. Earlier lines were imported.
    #[error("line {line_number}: {content}")]
    InvalidLine {
        /// The 1-based number of the offending line.
        line_number: usize,
        /// The line as it appeared in the file.
        content: String,
        /// How many runs were imported before this line.
        imported: usize,
        /// Why the line was rejected.
        #[source]
        source: ValidationError,
    },
}

impl ImportError {
    /// The number of runs that were imported before the error, if any were
    /// read at all.
    #[must_use]
    pub const fn imported(&self) -> usize {
        match self {
            Self::InvalidLine { imported, .. } => *imported,
            Self::UnsupportedContentType(_) | Self::Io { .. } => 0,
        }
    }
}

/// Imports every line of `content` into `collection`.
///
/// Lines are separated by `\n`; a trailing `\r` is ignored and blank lines are
/// skipped. Returns the number of runs imported.
///
/// # Errors
///
/// Returns [`ImportError::InvalidLine`] for the first line that fails
/// validation. Runs from the preceding lines remain in `collection`.
#[instrument(level = "debug", skip_all)]
pub fn import_str(
    content: &str,
    collection: &mut RunCollection,
    parser: &RunRecordParser,
) -> Result<usize, ImportError> {
    let mut imported = 0;

    for (index, line) in content.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            continue;
        }

        match parser.parse_delimited_line(line) {
            Ok(record) => {
                collection.insert(record);
                imported += 1;
            }
            Err(source) => {
                let line_number = index + 1;
                warn!(line_number, %source, "stopping import at invalid line");
                return Err(ImportError::InvalidLine {
                    line_number,
                    content: line.to_string(),
                    imported,
                    source,
                });
            }
        }
    }

    debug!(imported, "import complete");
    Ok(imported)
}

/// Imports runs from a CSV or plain-text file.
///
/// The whole file is read into memory before parsing.
///
/// # Errors
///
/// Returns [`ImportError::UnsupportedContentType`] for files that are not
/// `.csv` or `.txt`, [`ImportError::Io`] if the file cannot be read as UTF-8,
/// and [`ImportError::InvalidLine`] as described in [`import_str`].
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn import_file(
    path: &Path,
    collection: &mut RunCollection,
    parser: &RunRecordParser,
) -> Result<usize, ImportError> {
    let content_type = ContentType::from_path(path)
        .ok_or_else(|| ImportError::UnsupportedContentType(path.to_path_buf()))?;
    debug!(%content_type, "reading import file");

    let content = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    import_str(&content, collection, parser)
}
