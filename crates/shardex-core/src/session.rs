//! Export session values and session directory creation.
//!
//! An [`ExportSession`] is an immutable value built once per run and threaded
//! through each stage. The session directory name is seeded from the creation
//! timestamp at second granularity; two sessions started in the same second
//! against the same base directory would collide, which is accepted.

use crate::error::{ExportError, Result};
use chrono::{DateTime, Local, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of every session directory name.
pub const SESSION_DIR_PREFIX: &str = "shared-secrets-";

/// One opaque share of a split secret, with its position in the input
/// sequence. Content is never inspected or altered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    content: String,
    ordinal: usize,
}

impl Fragment {
    pub fn new(ordinal: usize, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ordinal,
        }
    }

    /// The share content, byte-for-byte as received.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// 0-based position in the input sequence.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// 1-based index used in filenames.
    pub fn index(&self) -> usize {
        self.ordinal + 1
    }
}

/// One export run: a base directory, an operator-supplied label, a creation
/// timestamp, the derived session directory, and the fragments to write.
#[derive(Debug, Clone)]
pub struct ExportSession {
    base_dir: PathBuf,
    label: String,
    created_at: DateTime<Utc>,
    session_dir: PathBuf,
    fragments: Vec<Fragment>,
}

impl ExportSession {
    /// Build a session value. No filesystem side effects; the directory is
    /// created by [`ExportSession::create_session_dir`].
    pub fn new(
        base_dir: impl Into<PathBuf>,
        label: impl Into<String>,
        fragments: Vec<Fragment>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let base_dir = base_dir.into();
        let session_dir = base_dir.join(format!(
            "{}{}",
            SESSION_DIR_PREFIX,
            created_at.timestamp()
        ));
        Self {
            base_dir,
            label: label.into(),
            created_at,
            session_dir,
            fragments,
        }
    }

    /// Convenience constructor taking raw share strings in input order.
    pub fn from_shares(
        base_dir: impl Into<PathBuf>,
        label: impl Into<String>,
        shares: Vec<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let fragments = shares
            .into_iter()
            .enumerate()
            .map(|(ordinal, content)| Fragment::new(ordinal, content))
            .collect();
        Self::new(base_dir, label, fragments, created_at)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn session_dir(&self) -> &Path {
        &self.session_dir
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Creation time as rendered into documents, e.g. `07-Jun-2024 14:32:05`.
    pub fn timestamp_display(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%d-%b-%Y %H:%M:%S")
            .to_string()
    }

    /// Create the session directory (and missing ancestors) with mode 0755.
    ///
    /// Failure is fatal for the run and is not retried.
    pub fn create_session_dir(&self) -> Result<()> {
        let mut builder = std::fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder
            .create(&self.session_dir)
            .map_err(|source| ExportError::DirectoryCreation {
                path: self.session_dir.clone(),
                source,
            })?;

        info!(path = %self.session_dir.display(), "Session directory created");
        Ok(())
    }
}
