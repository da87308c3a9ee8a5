//! Export orchestration: session directory, README, fragment documents.

use crate::error::Result;
use crate::session::ExportSession;
use crate::template::{self, RenderContext};
use crate::writer::{self, FragmentFileWriter};
use serde::Serialize;
use shardex_config::Config;
use std::path::{Path, PathBuf};
use tracing::info;

/// Name of the per-session explanatory document.
pub const README_FILE: &str = "README.md";

/// Default template file names, relative to the templates directory.
pub const FRAGMENT_TEMPLATE_FILE: &str = "fragment.md";
pub const README_TEMPLATE_FILE: &str = "readme.md";

/// What an exported file is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportedKind {
    Readme,
    /// Fragment document with its 1-based index.
    FragmentDocument { index: usize },
}

/// One file written during an export run.
#[derive(Debug, Clone, Serialize)]
pub struct ExportedFile {
    pub path: PathBuf,
    pub kind: ExportedKind,
}

/// Paths of the two consumed templates.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub fragment: PathBuf,
    pub readme: PathBuf,
}

impl TemplateSet {
    /// Conventional layout: `<dir>/fragment.md` and `<dir>/readme.md`.
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            fragment: dir.join(FRAGMENT_TEMPLATE_FILE),
            readme: dir.join(README_TEMPLATE_FILE),
        }
    }
}

/// Runs one export session to completion.
///
/// The run is synchronous, single-pass, and non-resumable: session directory
/// first, then the README, then each fragment document in input order. A
/// failure part-way leaves the files already written on disk; there is no
/// rollback.
pub struct SessionExporter<'a> {
    config: &'a Config,
    templates: TemplateSet,
    report: String,
}

impl<'a> SessionExporter<'a> {
    pub fn new(config: &'a Config, templates: TemplateSet) -> Self {
        Self {
            config,
            templates,
            report: String::new(),
        }
    }

    /// Set the free-form report text rendered into each fragment document.
    pub fn with_report(mut self, report: impl Into<String>) -> Self {
        self.report = report.into();
        self
    }

    /// Export the session: create the directory and write README plus one
    /// document per fragment. Returns the files written, README first.
    pub fn export(&self, session: &ExportSession) -> Result<Vec<ExportedFile>> {
        session.create_session_dir()?;

        let mut exported = Vec::with_capacity(session.fragments().len() + 1);
        exported.push(self.write_readme(session)?);

        let fragment_writer = FragmentFileWriter::new(
            session.session_dir(),
            &self.config.fragments.filename_root,
            session.label(),
        );

        for fragment in session.fragments() {
            let ctx = self.fragment_context(session, fragment.content());
            let rendered = template::render_file(&self.templates.fragment, &ctx)?;
            let path = fragment_writer.write(fragment.index(), &rendered)?;
            exported.push(ExportedFile {
                path,
                kind: ExportedKind::FragmentDocument {
                    index: fragment.index(),
                },
            });
        }

        info!(
            dir = %session.session_dir().display(),
            files = exported.len(),
            "Export complete"
        );
        Ok(exported)
    }

    fn write_readme(&self, session: &ExportSession) -> Result<ExportedFile> {
        let ctx = RenderContext::new()
            .with("label", session.label())
            .with("timestamp", session.timestamp_display());
        let rendered = template::render_file(&self.templates.readme, &ctx)?;

        let path = session.session_dir().join(README_FILE);
        writer::write_document(&path, &rendered)?;
        Ok(ExportedFile {
            path,
            kind: ExportedKind::Readme,
        })
    }

    fn fragment_context(&self, session: &ExportSession, content: &str) -> RenderContext {
        RenderContext::new()
            .with("label", session.label())
            .with("timestamp", session.timestamp_display())
            .with("report", self.report.clone())
            .with("contactName", self.config.contact.name.clone())
            .with("contactEmail", self.config.contact.email.clone())
            .with("fragment", content)
    }
}
