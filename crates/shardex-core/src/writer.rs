//! Fragment document filenames and writes.

use crate::error::{ExportError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension shared by the README and every fragment document.
pub const DOCUMENT_EXTENSION: &str = "md";

/// Writes rendered fragment documents into a session directory.
///
/// Filenames are fully deterministic from (root, label, index):
/// `<filename_root>-<label>-<index>.md`, 1-based index. An existing file at
/// that path is overwritten without warning; the uniquely named session
/// directory is the only isolation boundary between runs.
#[derive(Debug)]
pub struct FragmentFileWriter {
    session_dir: PathBuf,
    filename_root: String,
    label: String,
}

impl FragmentFileWriter {
    pub fn new(
        session_dir: impl Into<PathBuf>,
        filename_root: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            session_dir: session_dir.into(),
            filename_root: filename_root.into(),
            label: label.into(),
        }
    }

    /// Path for the fragment with the given 1-based index.
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.session_dir.join(format!(
            "{}-{}-{}.{}",
            self.filename_root, self.label, index, DOCUMENT_EXTENSION
        ))
    }

    /// Write one rendered fragment document, returning its path.
    pub fn write(&self, index: usize, rendered: &str) -> Result<PathBuf> {
        let path = self.path_for(index);
        std::fs::write(&path, rendered).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = rendered.len(), "Fragment document written");
        Ok(path)
    }
}

/// Write a rendered document to an explicit path (used for the README).
pub fn write_document(path: &Path, rendered: &str) -> Result<()> {
    std::fs::write(path, rendered).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = rendered.len(), "Document written");
    Ok(())
}
