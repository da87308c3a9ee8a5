//! Secret-share export and secure lifecycle manager.
//!
//! Takes pre-computed secret-share fragments (produced upstream by a
//! splitting algorithm such as Shamir's scheme), writes each one as a
//! human-readable Markdown document inside a uniquely named session
//! directory alongside a README, and then offers a confirm-gated secure
//! destruction pass over everything it wrote.
//!
//! # Lifecycle
//!
//! `Exported → AwaitingConfirmation → {Destroyed | Retained}`
//!
//! Export runs to completion before cleanup starts; the phases are strictly
//! sequential and the cleanup phase re-scans the directory instead of
//! trusting the in-memory file list.
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use shardex_core::cleanup::SecureCleanup;
//! use shardex_core::export::{SessionExporter, TemplateSet};
//! use shardex_core::external::{ShredDeleter, TerminalPrompt};
//! use shardex_core::session::ExportSession;
//! use std::path::Path;
//!
//! let config = shardex_config::Config::resolve(None).unwrap();
//! let session = ExportSession::from_shares(
//!     "/tmp/out",
//!     "alice",
//!     vec!["AAA".into(), "BBB".into()],
//!     Utc::now(),
//! );
//!
//! let templates = TemplateSet::from_dir(Path::new("templates"));
//! let exported = SessionExporter::new(&config, templates)
//!     .export(&session)
//!     .unwrap();
//! assert_eq!(exported.len(), 3); // README + 2 fragments
//!
//! let _outcome = SecureCleanup::new(&ShredDeleter, &TerminalPrompt)
//!     .run(session.session_dir())
//!     .unwrap();
//! ```

pub mod cleanup;
pub mod error;
pub mod export;
pub mod external;
pub mod session;
pub mod template;
pub mod writer;

pub use cleanup::{CleanupOutcome, DeleteResult, DeleteStatus, SecureCleanup};
pub use error::{ExportError, Result};
pub use export::{ExportedFile, ExportedKind, SessionExporter, TemplateSet, README_FILE};
pub use external::{ConfirmPrompt, DirectoryPicker, SecureDeleter};
pub use session::{ExportSession, Fragment, SESSION_DIR_PREFIX};
pub use template::{render, render_file, RenderContext};
pub use writer::FragmentFileWriter;
