//! Saving merge results to disk.

use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{PdfBenchError, Result};

/// Save result bytes as a file at the given path.
///
/// The platform counterpart of a browser download trigger: creates any
/// missing parent directories, then writes the buffer through a buffered
/// writer and flushes it.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn trigger_download(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| PdfBenchError::FailedToCreateOutput {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let file = std::fs::File::create(path).map_err(|e| PdfBenchError::FailedToCreateOutput {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .and_then(|_| writer.flush())
        .map_err(|e| PdfBenchError::FailedToWrite {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
