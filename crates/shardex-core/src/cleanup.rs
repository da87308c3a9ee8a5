//! Confirm-gated secure destruction of an exported session.
//!
//! The lifecycle is `Exported → AwaitingConfirmation → {Destroyed |
//! Retained}`. The controller re-scans the session directory rather than
//! trusting an in-memory file list, so anything incidentally present is seen
//! too. Listing happens twice: once for the confirmation report and again
//! after confirmation, immediately before destruction.

use crate::error::{ExportError, Result};
use crate::external::{ConfirmPrompt, SecureDeleter};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of the destroy attempt for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteStatus {
    Destroyed,
    Failed { reason: String },
}

/// Per-file destruction result. Failures do not block sibling files, so the
/// run's outcome is this list rather than a single global result.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResult {
    pub path: PathBuf,
    pub status: DeleteStatus,
}

/// Terminal state of the cleanup phase.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum CleanupOutcome {
    /// Operator confirmed; per-file results, in scan order.
    Destroyed { results: Vec<DeleteResult> },
    /// Operator declined; every file is left on disk untouched.
    Retained,
}

impl CleanupOutcome {
    /// Paths whose destroy attempt failed.
    pub fn failures(&self) -> Vec<&DeleteResult> {
        match self {
            CleanupOutcome::Destroyed { results } => results
                .iter()
                .filter(|r| !matches!(r.status, DeleteStatus::Destroyed))
                .collect(),
            CleanupOutcome::Retained => Vec::new(),
        }
    }
}

/// Drives the List → Confirm → re-List-and-Destroy sequence over one
/// session directory.
pub struct SecureCleanup<'a> {
    deleter: &'a dyn SecureDeleter,
    prompt: &'a dyn ConfirmPrompt,
}

impl<'a> SecureCleanup<'a> {
    pub fn new(deleter: &'a dyn SecureDeleter, prompt: &'a dyn ConfirmPrompt) -> Self {
        Self { deleter, prompt }
    }

    /// Report the session's files, ask for confirmation, and destroy them if
    /// granted. Declining is a terminal non-error outcome.
    pub fn run(&self, session_dir: &Path) -> Result<CleanupOutcome> {
        let listed = list_entries(session_dir)?;

        println!(
            "Your secrets have been split and saved as individual files. \
             Holding these files in one place may be a security vulnerability."
        );
        println!("Files:");
        for path in &listed {
            println!("{}", path.display());
        }

        if !self.prompt.confirm_destroy(&listed)? {
            info!(dir = %session_dir.display(), "Destruction declined, files retained");
            return Ok(CleanupOutcome::Retained);
        }

        // Second scan: destroy what is on disk now, not what was listed.
        // Every regular file is matched regardless of extension, so the
        // exported .md documents are actually destroyed.
        let targets = list_files(session_dir)?;
        let mut results = Vec::with_capacity(targets.len());

        for path in targets {
            println!("Shredding {}...", path.display());
            let status = match self.deleter.secure_delete(&path) {
                Ok(output) => {
                    if !output.trim().is_empty() {
                        println!("{}", output.trim_end());
                    }
                    DeleteStatus::Destroyed
                }
                Err(ExportError::SecureDelete { reason, .. }) => {
                    warn!(path = %path.display(), %reason, "Secure delete failed");
                    eprintln!("failed to shred {}: {reason}", path.display());
                    DeleteStatus::Failed { reason }
                }
                Err(other) => return Err(other),
            };
            results.push(DeleteResult { path, status });
        }

        let failed = results
            .iter()
            .filter(|r| !matches!(r.status, DeleteStatus::Destroyed))
            .count();
        info!(
            dir = %session_dir.display(),
            destroyed = results.len() - failed,
            failed,
            "Cleanup complete"
        );
        Ok(CleanupOutcome::Destroyed { results })
    }
}

/// Every entry under `dir`, recursively, directories included. Sorted for
/// stable reporting.
fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    walk(dir, &mut |path, _is_dir| entries.push(path.to_path_buf()))?;
    entries.sort();
    Ok(entries)
}

/// Every regular file under `dir`, recursively. Sorted for stable destroy
/// order.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk(dir, &mut |path, is_dir| {
        if !is_dir {
            files.push(path.to_path_buf());
        }
    })?;
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, visit: &mut dyn FnMut(&Path, bool)) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        // Non-following file type: a symlinked directory is treated as a
        // plain entry, never descended into, so the walk stays inside the
        // session directory and cannot loop on a self-referential link.
        let file_type = entry.file_type().map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        let is_dir = file_type.is_dir();
        visit(&path, is_dir);
        if is_dir {
            walk(&path, visit)?;
        }
    }
    Ok(())
}
