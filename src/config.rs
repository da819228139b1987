//! Configuration file handling.
//!
//! This module provides loading and parsing of `.secured_jdbc.json`
//! configuration files. Every section is optional; a missing file means
//! "use defaults".

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LogFormat;

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".secured_jdbc.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Default connection URL for `translate`
    #[serde(default)]
    pub connection: Option<ConnectionSection>,

    /// Catalog connection for `uniques`
    #[serde(default)]
    pub catalog: Option<CatalogSection>,

    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSection {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    pub connection_string: String,
}

/// Logging settings. An unset level defers to `RUST_LOG`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    #[serde(default)]
    pub level: Option<String>,

    #[serde(default)]
    pub format: LogFormat,
}

impl ConfigFile {
    /// Load `.secured_jdbc.json` from the current directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE_NAME))
    }

    /// Load from the current directory, falling back to defaults when the
    /// file does not exist. An unreadable or invalid file is still an error.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::load() {
            Err(ConfigError::NotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })
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
    fn test_full_deserialization() {
        let json = r#"
        {
            "connection": {
                "url": "secured://u:p@host:1234?CustomProperties=(dataset=X)"
            },
            "catalog": {
                "connection_string": "postgres://reader@localhost/app"
            },
            "logging": {
                "level": "debug",
                "format": "json"
            }
        }
        "#;

        let config: ConfigFile = serde_json::from_str(json).unwrap();
        assert_eq!(
            config.connection.unwrap().url,
            "secured://u:p@host:1234?CustomProperties=(dataset=X)"
        );
        assert_eq!(
            config.catalog.unwrap().connection_string,
            "postgres://reader@localhost/app"
        );
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: ConfigFile = serde_json::from_str("{}").unwrap();
        assert!(config.connection.is_none());
        assert!(config.catalog.is_none());
        assert!(config.logging.level.is_none());
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_partial_logging_section() {
        let config: ConfigFile = serde_json::from_str(r#"{"logging": {"level": "info"}}"#).unwrap();
        assert_eq!(config.logging.level.as_deref(), Some("info"));
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(r#"{"catalog": {"connection_string": "host=localhost"}}"#);
        let config = ConfigFile::load_from(file.path()).unwrap();
        assert_eq!(config.catalog.unwrap().connection_string, "host=localhost");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigFile::load_from(&dir.path().join(CONFIG_FILE_NAME));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let file = write_config("{ not json");
        let err = ConfigFile::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn test_catalog_requires_connection_string() {
        let result: Result<ConfigFile, _> = serde_json::from_str(r#"{"catalog": {}}"#);
        assert!(result.is_err());
    }
}
