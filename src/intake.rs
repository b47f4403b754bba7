//! File intake: selected-file handles and content-type screening.
//!
//! A [`SelectedFile`] is the unit the merge session collects: a display name,
//! the declared content type, the size in bytes, and a lazily read byte
//! source. Nothing here parses PDF structure; a file that declares
//! `application/pdf` but holds garbage passes intake and fails later, inside
//! the merge pipeline.

use std::path::Path;

use crate::error::{PdfBenchError, Result};

/// Content type accepted by the merge tool.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Fallback content type for files without a recognized declaration.
const OCTET_STREAM: &str = "application/octet-stream";

/// Where a selected file's bytes come from.
///
/// Files picked through the CLI stay on disk until the merge reads them;
/// embedders and tests can hand bytes over directly.
#[derive(Debug, Clone)]
enum FileSource {
    Path(std::path::PathBuf),
    Memory(Vec<u8>),
}

/// A user-chosen file pending merge.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    name: String,
    size: u64,
    content_type: String,
    source: FileSource,
}

impl SelectedFile {
    /// Create a selected file backed by a path on disk.
    ///
    /// Captures the display name, the size from file metadata, and the
    /// content type declared by the file's extension. The bytes themselves
    /// are not read until the merge asks for them.
    ///
    /// # Errors
    ///
    /// Returns an error if the file's metadata cannot be read.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| PdfBenchError::failed_to_read(&name, e))?;

        Ok(Self {
            name,
            size: metadata.len(),
            content_type: declared_content_type(path).to_string(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    /// Create a selected file backed by an in-memory buffer.
    pub fn from_bytes(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            content_type: content_type.into(),
            source: FileSource::Memory(bytes),
        }
    }

    /// Display name of the file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes as declared at selection time.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Declared content type.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Whether the file declares the PDF content type.
    pub fn is_pdf(&self) -> bool {
        self.content_type == PDF_CONTENT_TYPE
    }

    /// Size formatted in mebibytes to two decimal places, e.g. `"1.50 MB"`.
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size as f64 / (1024.0 * 1024.0))
    }

    /// Read the file's full byte content.
    ///
    /// # Errors
    ///
    /// Returns an error if a path-backed file cannot be read.
    pub async fn read(&self) -> Result<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => tokio::fs::read(path)
                .await
                .map_err(|e| PdfBenchError::failed_to_read(&self.name, e)),
            FileSource::Memory(bytes) => Ok(bytes.clone()),
        }
    }
}

/// Content type a file declares through its extension.
///
/// The CLI counterpart of the browser's `File.type`: declaration only, no
/// content sniffing.
pub fn declared_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_CONTENT_TYPE,
        _ => OCTET_STREAM,
    }
}
