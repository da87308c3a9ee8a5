//! Seams around the external processes and prompts the tool depends on.
//!
//! Orchestration code only sees three narrow traits: pick a directory,
//! confirm destruction, securely delete one file. The real implementations
//! shell out to `zenity` and `shred` and read the terminal; tests substitute
//! deterministic fakes. Every call is blocking; a hung external process
//! blocks the run, which is accepted behavior.

use crate::error::{ExportError, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// Interactive selection of the base directory for a session.
pub trait DirectoryPicker {
    fn select_directory(&self) -> Result<PathBuf>;
}

/// Yes/no gate before any destructive action. Default answer is yes.
pub trait ConfirmPrompt {
    fn confirm_destroy(&self, files: &[PathBuf]) -> Result<bool>;
}

/// Multi-pass overwrite-then-unlink of one file.
///
/// Returns the utility's combined output so it can be surfaced to the
/// operator. A non-zero exit is an error for that file only.
pub trait SecureDeleter {
    fn secure_delete(&self, path: &Path) -> Result<String>;
}

/// Directory picker backed by `zenity --file-selection --directory`.
#[derive(Debug)]
pub struct ZenityPicker {
    title: String,
}

impl ZenityPicker {
    pub fn new() -> Self {
        Self {
            title: "Select the directory in which to save shares.".to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl Default for ZenityPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryPicker for ZenityPicker {
    fn select_directory(&self) -> Result<PathBuf> {
        let output = Command::new("zenity")
            .arg("--file-selection")
            .arg("--directory")
            .arg(format!("--title={}", self.title))
            .output()
            .map_err(|e| ExportError::DirectorySelection {
                reason: format!("cannot run zenity: {e}"),
            })?;

        if !output.status.success() {
            // Cancelled dialogs exit non-zero as well; both end the run.
            return Err(ExportError::DirectorySelection {
                reason: format!(
                    "zenity exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        let selected = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if selected.is_empty() {
            return Err(ExportError::DirectorySelection {
                reason: "zenity returned an empty selection".to_string(),
            });
        }

        debug!(dir = %selected, "Base directory selected");
        Ok(PathBuf::from(selected))
    }
}

/// Secure deleter backed by `shred -vfzu`: multi-pass overwrite, forced,
/// zero-fill after, then unlink.
#[derive(Debug, Default)]
pub struct ShredDeleter;

impl SecureDeleter for ShredDeleter {
    fn secure_delete(&self, path: &Path) -> Result<String> {
        let output = Command::new("shred")
            .arg("-vfzu")
            .arg(path)
            .output()
            .map_err(|e| ExportError::SecureDelete {
                path: path.to_path_buf(),
                reason: format!("cannot run shred: {e}"),
            })?;

        // shred reports pass progress on stderr
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            warn!(path = %path.display(), status = %output.status, "shred failed");
            return Err(ExportError::SecureDelete {
                path: path.to_path_buf(),
                reason: format!("shred exited with {}: {}", output.status, combined.trim()),
            });
        }

        Ok(combined)
    }
}

/// Terminal yes/no prompt, default yes. Re-asks on unrecognized input.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl ConfirmPrompt for TerminalPrompt {
    fn confirm_destroy(&self, _files: &[PathBuf]) -> Result<bool> {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            print!("Do you want to securely shred the files? [Y/n] ");
            std::io::stdout().flush().map_err(|source| ExportError::Io {
                path: PathBuf::from("<stdout>"),
                source,
            })?;

            line.clear();
            let read = stdin
                .lock()
                .read_line(&mut line)
                .map_err(|source| ExportError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            if read == 0 {
                // EOF: take the default
                return Ok(true);
            }
            match line.trim().to_ascii_lowercase().as_str() {
                "" | "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                other => eprintln!("Please answer y or n (got {other:?})."),
            }
        }
    }
}

/// Non-interactive prompt that always confirms (CLI `--yes`).
#[derive(Debug, Default)]
pub struct AssumeYes;

impl ConfirmPrompt for AssumeYes {
    fn confirm_destroy(&self, _files: &[PathBuf]) -> Result<bool> {
        Ok(true)
    }
}
