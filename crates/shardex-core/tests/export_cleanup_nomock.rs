//! End-to-end export + cleanup tests against the real filesystem.
//!
//! The external process seams (deleter, prompt) are replaced by
//! deterministic fakes; everything else is real.

use chrono::{TimeZone, Utc};
use shardex_config::{Config, ContactConfig, FragmentsConfig};
use shardex_core::cleanup::{CleanupOutcome, SecureCleanup};
use shardex_core::error::Result;
use shardex_core::export::{ExportedKind, SessionExporter, TemplateSet};
use shardex_core::external::{ConfirmPrompt, SecureDeleter};
use shardex_core::session::ExportSession;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn test_config() -> Config {
    Config {
        fragments: FragmentsConfig {
            filename_root: "share".into(),
        },
        contact: ContactConfig {
            name: "Alice Operator".into(),
            email: "alice@example.org".into(),
        },
    }
}

fn write_templates(dir: &Path) -> TemplateSet {
    let set = TemplateSet::from_dir(dir);
    std::fs::write(
        &set.fragment,
        "# Share for $label\n\nCreated: $timestamp\n\n$report\n\n\
         Fragment:\n\n    $fragment\n\nContact: $contactName <$contactEmail>\n",
    )
    .unwrap();
    std::fs::write(&set.readme, "# Shared secrets ($label)\n\nCreated: $timestamp\n").unwrap();
    set
}

struct CountingDeleter {
    deleted: RefCell<Vec<PathBuf>>,
}

impl CountingDeleter {
    fn new() -> Self {
        Self {
            deleted: RefCell::new(Vec::new()),
        }
    }
}

impl SecureDeleter for CountingDeleter {
    fn secure_delete(&self, path: &Path) -> Result<String> {
        std::fs::remove_file(path).unwrap();
        self.deleted.borrow_mut().push(path.to_path_buf());
        Ok(String::new())
    }
}

struct Answer(bool);

impl ConfirmPrompt for Answer {
    fn confirm_destroy(&self, _files: &[PathBuf]) -> Result<bool> {
        Ok(self.0)
    }
}

/// The worked example: fragments ["AAA","BBB"], label "alice", root "share".
#[test]
fn export_produces_readme_plus_indexed_share_files() {
    let temp = TempDir::new().unwrap();
    let templates = write_templates(temp.path());
    let config = test_config();

    let created = Utc.with_ymd_and_hms(2024, 6, 7, 14, 32, 5).unwrap();
    let base = temp.path().join("x");
    let session = ExportSession::from_shares(
        &base,
        "alice",
        vec!["AAA".into(), "BBB".into()],
        created,
    );

    let exported = SessionExporter::new(&config, templates)
        .export(&session)
        .unwrap();

    let dir = base.join(format!("shared-secrets-{}", created.timestamp()));
    assert_eq!(session.session_dir(), dir.as_path());
    assert!(dir.join("README.md").is_file());

    let share1 = std::fs::read_to_string(dir.join("share-alice-1.md")).unwrap();
    let share2 = std::fs::read_to_string(dir.join("share-alice-2.md")).unwrap();
    assert!(share1.contains("AAA"));
    assert!(share2.contains("BBB"));

    // Exactly N+1 documents on disk.
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 3);
    assert_eq!(exported.len(), 3);
    assert_eq!(exported[0].kind, ExportedKind::Readme);
}

#[test]
fn full_lifecycle_export_then_confirmed_destroy() {
    let temp = TempDir::new().unwrap();
    let templates = write_templates(temp.path());
    let config = test_config();

    let session = ExportSession::from_shares(
        temp.path().join("out"),
        "bob",
        vec!["s1".into(), "s2".into(), "s3".into()],
        Utc::now(),
    );
    let exported = SessionExporter::new(&config, templates)
        .export(&session)
        .unwrap();
    assert_eq!(exported.len(), 4);

    let deleter = CountingDeleter::new();
    let outcome = SecureCleanup::new(&deleter, &Answer(true))
        .run(session.session_dir())
        .unwrap();

    let CleanupOutcome::Destroyed { results } = outcome else {
        panic!("expected Destroyed");
    };
    assert_eq!(results.len(), 4);
    assert_eq!(deleter.deleted.borrow().len(), 4);
    // Directory itself remains; its contents are gone.
    assert_eq!(
        std::fs::read_dir(session.session_dir()).unwrap().count(),
        0
    );
}

#[test]
fn full_lifecycle_export_then_declined_destroy() {
    let temp = TempDir::new().unwrap();
    let templates = write_templates(temp.path());
    let config = test_config();

    let session = ExportSession::from_shares(
        temp.path().join("out"),
        "carol",
        vec!["only-share".into()],
        Utc::now(),
    );
    let exported = SessionExporter::new(&config, templates)
        .export(&session)
        .unwrap();

    let before: Vec<(PathBuf, Vec<u8>)> = exported
        .iter()
        .map(|f| (f.path.clone(), std::fs::read(&f.path).unwrap()))
        .collect();

    let deleter = CountingDeleter::new();
    let outcome = SecureCleanup::new(&deleter, &Answer(false))
        .run(session.session_dir())
        .unwrap();

    assert!(matches!(outcome, CleanupOutcome::Retained));
    assert!(deleter.deleted.borrow().is_empty());
    for (path, bytes) in before {
        assert_eq!(std::fs::read(&path).unwrap(), bytes, "{path:?} changed");
    }
}

#[test]
fn two_sessions_in_one_base_dir_do_not_collide() {
    let temp = TempDir::new().unwrap();
    let templates = write_templates(temp.path());
    let config = test_config();

    let t1 = Utc.with_ymd_and_hms(2024, 6, 7, 14, 32, 5).unwrap();
    let t2 = t1 + chrono::Duration::seconds(1);
    let base = temp.path().join("out");

    let first = ExportSession::from_shares(&base, "alice", vec!["AAA".into()], t1);
    let second = ExportSession::from_shares(&base, "alice", vec!["ZZZ".into()], t2);

    let exporter = SessionExporter::new(&config, templates);
    exporter.export(&first).unwrap();
    exporter.export(&second).unwrap();

    assert_ne!(first.session_dir(), second.session_dir());
    let one = std::fs::read_to_string(first.session_dir().join("share-alice-1.md")).unwrap();
    let other = std::fs::read_to_string(second.session_dir().join("share-alice-1.md")).unwrap();
    assert!(one.contains("AAA"));
    assert!(other.contains("ZZZ"));
}
