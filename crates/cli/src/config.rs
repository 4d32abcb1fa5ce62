//! CLI configuration file.
//!
//! ```json
//! {
//!   "log_level": "info",
//!   "pretty": true,
//!   "projector": { "strict_checksums": false }
//! }
//! ```

use anyhow::{Context, Result};
use qrl_explorer_projector::ProjectorConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "qrl-explorer.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log filter used when neither `--log-level` nor `RUST_LOG` is set.
    pub log_level: Option<String>,
    pub pretty: bool,
    pub projector: ProjectorConfig,
}

impl CliConfig {
    /// Flags can only switch options on.
    pub fn apply_overrides(&mut self, pretty: bool, strict: bool) {
        self.pretty |= pretty;
        self.projector.strict_checksums |= strict;
    }
}

fn read(path: &Path) -> Result<CliConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

/// Load the given config file, or the default one if it exists.
pub fn load(path: Option<&Path>) -> Result<CliConfig> {
    match path {
        Some(path) => read(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.is_file() {
                read(default)
            } else {
                Ok(CliConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"{"log_level": "debug", "pretty": true, "projector": {"strict_checksums": true}}"#,
        );
        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(config.pretty);
        assert!(config.projector.strict_checksums);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let file = write_config(r#"{"pretty": true}"#);
        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.log_level, None);
        assert!(!config.projector.strict_checksums);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_config() {
        let file = write_config("{not json");
        let err = load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_overrides() {
        let mut config = CliConfig::default();
        config.apply_overrides(false, true);
        assert!(!config.pretty);
        assert!(config.projector.strict_checksums);

        config.apply_overrides(true, false);
        assert!(config.pretty);
        assert!(config.projector.strict_checksums);
    }
}
