//! Error types for export and cleanup operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while exporting shares or destroying them.
///
/// Configuration, directory-selection, and directory-creation errors abort
/// the run before (or instead of) writing files. Template and write errors
/// are fatal for the affected document only; documents already on disk
/// remain. Secure-delete errors are reported per file and do not block the
/// remaining files.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Configuration document missing or invalid.
    #[error(transparent)]
    Config(#[from] shardex_config::ConfigError),

    /// External directory picker failed or was cancelled.
    #[error("directory selection failed: {reason}")]
    DirectorySelection { reason: String },

    /// Session directory could not be created.
    #[error("cannot create session directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template file could not be read.
    #[error("cannot read template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template referenced a placeholder with no supplied value.
    #[error("template references unknown placeholder ${name}")]
    MissingPlaceholder { name: String },

    /// A `$` in a template is not followed by a valid placeholder.
    #[error("invalid placeholder syntax at byte {position}")]
    InvalidPlaceholder { position: usize },

    /// A rendered document could not be written.
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The secure-delete utility failed for one file.
    #[error("secure delete failed for {path}: {reason}")]
    SecureDelete { path: PathBuf, reason: String },

    /// I/O error outside any of the cases above (directory scans, prompts).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for export and cleanup operations.
pub type Result<T> = std::result::Result<T, ExportError>;
