//! Shardex configuration loading and validation.
//!
//! The configuration is a small JSON document consumed before any file is
//! written:
//!
//! ```json
//! {
//!   "fragments": { "filenameRoot": "share" },
//!   "contact": { "name": "Alice Operator", "email": "alice@example.org" }
//! }
//! ```
//!
//! Resolution order: explicit `--config` path, then the `SHARDEX_CONFIG`
//! environment variable, then `./config.json`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable overriding the config file location.
pub const ENV_CONFIG_PATH: &str = "SHARDEX_CONFIG";

/// Default config file name, resolved relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Errors raised while loading or validating the configuration.
///
/// All of these abort the run before any file is written.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config at {path}: {field} must not be empty")]
    EmptyField { path: PathBuf, field: &'static str },
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Settings controlling exported fragment filenames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentsConfig {
    /// Leading component of every fragment filename
    /// (`<filenameRoot>-<label>-<index>.md`).
    #[serde(rename = "filenameRoot")]
    pub filename_root: String,
}

/// Contact details rendered into each fragment document so a share holder
/// knows who to reach.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    pub name: String,
    pub email: String,
}

/// Top-level shardex configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub fragments: FragmentsConfig,
    pub contact: ContactConfig,
}

impl Config {
    /// Load and validate the configuration from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate(path)?;
        debug!(path = %path.display(), root = %config.fragments.filename_root, "Config loaded");
        Ok(config)
    }

    /// Resolve the config path from an explicit override, the environment,
    /// or the default location, then load it.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match std::env::var_os(ENV_CONFIG_PATH) {
                Some(p) => PathBuf::from(p),
                None => PathBuf::from(DEFAULT_CONFIG_FILE),
            },
        };
        Self::load(&path)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.fragments.filename_root.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                path: path.to_path_buf(),
                field: "fragments.filenameRoot",
            });
        }
        if self.contact.name.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                path: path.to_path_buf(),
                field: "contact.name",
            });
        }
        if self.contact.email.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                path: path.to_path_buf(),
                field: "contact.email",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_valid_config() {
        let file = write_config(
            r#"{
                "fragments": { "filenameRoot": "share" },
                "contact": { "name": "Alice", "email": "alice@example.org" }
            }"#,
        );

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.fragments.filename_root, "share");
        assert_eq!(config.contact.name, "Alice");
        assert_eq!(config.contact.email, "alice@example.org");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/config.json"));
    }

    #[test]
    fn missing_contact_section_fails() {
        let file = write_config(r#"{ "fragments": { "filenameRoot": "share" } }"#);
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_filename_root_fails() {
        let file = write_config(
            r#"{
                "fragments": {},
                "contact": { "name": "Alice", "email": "alice@example.org" }
            }"#,
        );
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn empty_filename_root_fails_validation() {
        let file = write_config(
            r#"{
                "fragments": { "filenameRoot": "  " },
                "contact": { "name": "Alice", "email": "alice@example.org" }
            }"#,
        );
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EmptyField {
                field: "fragments.filenameRoot",
                ..
            }
        ));
    }

    #[test]
    fn camel_case_keys_round_trip() {
        let config = Config {
            fragments: FragmentsConfig {
                filename_root: "share".into(),
            },
            contact: ContactConfig {
                name: "Alice".into(),
                email: "alice@example.org".into(),
            },
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"filenameRoot\""));
    }
}
