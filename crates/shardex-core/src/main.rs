//! Shardex - secret share export and secure lifecycle manager.
//!
//! The binary wires the library stages together: load config, pick a base
//! directory, export the fragments, then offer the confirm-gated destroy
//! pass. stdout carries operator-facing report text; logs go to stderr.

use clap::Parser;
use shardex_core::cleanup::{CleanupOutcome, SecureCleanup};
use shardex_core::error::ExportError;
use shardex_core::export::{SessionExporter, TemplateSet};
use shardex_core::external::{
    AssumeYes, ConfirmPrompt, DirectoryPicker, ShredDeleter, TerminalPrompt, ZenityPicker,
};
use shardex_core::session::ExportSession;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit codes, one per fatal error class.
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const USAGE: u8 = 1;
    pub const CONFIG: u8 = 2;
    pub const DIRECTORY_SELECTION: u8 = 3;
    pub const DIRECTORY_CREATION: u8 = 4;
    pub const TEMPLATE_OR_WRITE: u8 = 5;
    pub const SECURE_DELETE: u8 = 6;
}

/// Shardex - split-secret share export and secure lifecycle manager
#[derive(Parser, Debug)]
#[command(name = "shardex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Human-readable tag embedded in filenames and documents
    /// (e.g. a recipient name)
    #[arg(short, long, default_value = "")]
    label: String,

    /// File holding one fragment per line (default: read stdin)
    #[arg(long)]
    fragments_file: Option<PathBuf>,

    /// Config file path (default: ./config.json)
    #[arg(long, env = "SHARDEX_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding fragment.md and readme.md templates
    #[arg(long, env = "SHARDEX_TEMPLATES", default_value = "templates")]
    templates_dir: PathBuf,

    /// Base directory for the session (skips the zenity picker)
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Free-form report text rendered into each fragment document
    #[arg(long, default_value = "")]
    report: String,

    /// Leave the exported files on disk; never offer destruction
    #[arg(long)]
    keep: bool,

    /// Confirm destruction without prompting
    #[arg(short = 'y', long, conflicts_with = "keep")]
    yes: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Errors only
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("shardex={level},shardex_core={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_fragments(cli: &Cli) -> std::io::Result<Vec<String>> {
    let raw = match &cli.fragments_file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(raw
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn exit_code_for(err: &ExportError) -> u8 {
    match err {
        ExportError::Config(_) => exit_codes::CONFIG,
        ExportError::DirectorySelection { .. } => exit_codes::DIRECTORY_SELECTION,
        ExportError::DirectoryCreation { .. } => exit_codes::DIRECTORY_CREATION,
        ExportError::TemplateRead { .. }
        | ExportError::MissingPlaceholder { .. }
        | ExportError::InvalidPlaceholder { .. }
        | ExportError::Write { .. } => exit_codes::TEMPLATE_OR_WRITE,
        ExportError::SecureDelete { .. } => exit_codes::SECURE_DELETE,
        ExportError::Io { .. } => exit_codes::USAGE,
    }
}

fn run(cli: &Cli) -> Result<u8, ExportError> {
    let config = shardex_config::Config::resolve(cli.config.as_deref())?;

    let fragments = read_fragments(cli).map_err(|source| ExportError::Io {
        path: cli
            .fragments_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("<stdin>")),
        source,
    })?;
    if fragments.is_empty() {
        eprintln!("no fragments to export (empty input)");
        return Ok(exit_codes::USAGE);
    }

    let base_dir = match &cli.base_dir {
        Some(dir) => dir.clone(),
        None => ZenityPicker::new().select_directory()?,
    };

    let session = ExportSession::from_shares(
        base_dir,
        cli.label.clone(),
        fragments,
        chrono::Utc::now(),
    );

    let templates = TemplateSet::from_dir(&cli.templates_dir);
    let exported = SessionExporter::new(&config, templates)
        .with_report(cli.report.clone())
        .export(&session)?;

    println!(
        "Exported {} files to {}",
        exported.len(),
        session.session_dir().display()
    );

    if cli.keep {
        println!("Files retained (--keep). Remember to destroy them once distributed.");
        return Ok(exit_codes::SUCCESS);
    }

    let deleter = ShredDeleter;
    let prompt: &dyn ConfirmPrompt = if cli.yes { &AssumeYes } else { &TerminalPrompt };
    let outcome = SecureCleanup::new(&deleter, prompt).run(session.session_dir())?;

    match outcome {
        CleanupOutcome::Retained => {
            println!("Files retained. Remember to destroy them once distributed.");
            Ok(exit_codes::SUCCESS)
        }
        CleanupOutcome::Destroyed { ref results } => {
            let failures = outcome.failures();
            if failures.is_empty() {
                println!("Securely destroyed {} files.", results.len());
                Ok(exit_codes::SUCCESS)
            } else {
                for failure in &failures {
                    eprintln!("still on disk: {}", failure.path.display());
                }
                Ok(exit_codes::SECURE_DELETE)
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::from(exit_code_for(&err))
        }
    }
}
