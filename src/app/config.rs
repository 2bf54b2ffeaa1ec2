// LeadGrid - app/config.rs
//
// TOML configuration. Every field is defaulted so an absent file or a
// partial file behaves predictably; only a present-but-malformed file
// is an error.

use crate::util::constants::DEFAULT_SEED_MEMBER;
use crate::util::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Top-level application configuration.
///
/// ```toml
/// [roster]
/// seed_members = ["Yadvendra"]
///
/// [export]
/// projection = ["domain", "region", "assigned_to"]
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub roster: RosterConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// `[roster]` section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RosterConfig {
    /// Members present in every fresh session roster.
    pub seed_members: Vec<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            seed_members: vec![DEFAULT_SEED_MEMBER.to_string()],
        }
    }
}

/// `[export]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Column names for the export projection. `None` means the full
    /// default column order.
    pub projection: Option<Vec<String>>,
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (overridden by RUST_LOG and --debug).
    pub level: Option<String>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.roster.seed_members, vec!["Yadvendra".to_string()]);
        assert_eq!(config.export.projection, None);
        assert_eq!(config.logging.level, None);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.roster.seed_members, vec!["Yadvendra".to_string()]);
    }

    #[test]
    fn test_full_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[roster]\nseed_members = [\"Alice\", \"Bob\"]\n\n\
             [export]\nprojection = [\"domain\", \"assigned_to\"]"
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(
            config.roster.seed_members,
            vec!["Alice".to_string(), "Bob".to_string()]
        );
        assert_eq!(
            config.export.projection,
            Some(vec!["domain".to_string(), "assigned_to".to_string()])
        );
    }

    #[test]
    fn test_malformed_file_is_a_typed_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not toml [[[").unwrap();
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse { .. }));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = AppConfig::load(Path::new("/nonexistent/leadgrid.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
