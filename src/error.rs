//! Error types for pdfbench.
//!
//! Two audiences share these errors: library callers get the full variant
//! with the failing file or position attached, while the user-facing surface
//! collapses recoverable errors into the short blocking alerts via
//! [`PdfBenchError::user_message`].

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfbench operations.
pub type Result<T> = std::result::Result<T, PdfBenchError>;

/// Alert shown when a selection contains no PDF files.
pub const ALERT_PDF_ONLY: &str = "Please select PDF files only.";

/// Alert shown when a merge is requested with fewer than two files.
pub const ALERT_NEED_TWO: &str = "Please select at least 2 PDF files to merge.";

/// Generic alert shown when any step of the merge pipeline fails.
pub const ALERT_MERGE_FAILED: &str = "An error occurred while merging the PDFs. Please try again.";

/// Main error type for pdfbench operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfBenchError {
    /// None of the offered files declared a PDF content type.
    #[error("No PDF files selected")]
    NoPdfFiles,

    /// A removal was requested at a position the collection does not have.
    #[error("No file at position {index} (collection holds {len} file(s))")]
    IndexOutOfRange {
        /// Requested zero-based position.
        index: usize,
        /// Current collection length.
        len: usize,
    },

    /// A merge was requested with fewer than two files in the collection.
    #[error("At least 2 PDF files are required to merge, found {count}")]
    TooFewFiles {
        /// Number of files currently in the collection.
        count: usize,
    },

    /// A merge was requested while another one is still running.
    #[error("A merge is already in progress")]
    MergeInProgress,

    /// A selected file's bytes could not be read.
    #[error("Failed to read file: {name}\n  Reason: {source}")]
    FailedToRead {
        /// Display name of the file.
        name: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A selected file's bytes could not be parsed as a PDF document.
    #[error("Failed to parse PDF: {name}\n  Reason: {reason}")]
    FailedToParsePdf {
        /// Display name of the file.
        name: String,
        /// Reason reported by the document library.
        reason: String,
    },

    /// Splicing pages into the output document failed.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// The accumulated output document could not be serialized.
    #[error("Failed to serialize merged document: {reason}")]
    SerializationFailed {
        /// Reason reported by the document library.
        reason: String,
    },

    /// The download target file could not be created.
    #[error("Failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Writing the result bytes to the download target failed.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An input pattern could not be parsed as a glob.
    #[error("Failed to parse glob pattern: {0}")]
    FailedToParseGlobPattern(#[from] glob::PatternError),

    /// A glob match could not be resolved to a path.
    #[error("Failed to process glob entry: {0}")]
    FailedToProcessGlobEntry(#[from] glob::GlobError),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PdfBenchError {
    /// Create a FailedToRead error.
    pub fn failed_to_read(name: impl Into<String>, source: io::Error) -> Self {
        Self::FailedToRead {
            name: name.into(),
            source,
        }
    }

    /// Create a FailedToParsePdf error.
    pub fn failed_to_parse(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FailedToParsePdf {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create a SerializationFailed error.
    pub fn serialization_failed(reason: impl Into<String>) -> Self {
        Self::SerializationFailed {
            reason: reason.into(),
        }
    }

    /// The blocking alert text a user sees for this error, if it maps to one.
    ///
    /// Intake and precondition failures keep their specific alerts; every
    /// failure inside the merge pipeline collapses to the single generic
    /// alert. Errors outside the session surface (output writing, glob
    /// expansion) have no alert and are reported through [`std::fmt::Display`].
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::NoPdfFiles => Some(ALERT_PDF_ONLY),
            Self::TooFewFiles { .. } => Some(ALERT_NEED_TWO),
            Self::MergeInProgress
            | Self::FailedToRead { .. }
            | Self::FailedToParsePdf { .. }
            | Self::MergeFailed { .. }
            | Self::SerializationFailed { .. } => Some(ALERT_MERGE_FAILED),
            _ => None,
        }
    }
}
