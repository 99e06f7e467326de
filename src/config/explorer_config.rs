//! Explorer access configuration parsing from environment variables.

use super::{EnvSource, parse_or};
use crate::infrastructure::core::HttpSettings;
use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

/// Explorer environment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerEnvConfig {
    pub base_url: String,
    pub http: HttpSettings,
    /// Optional TOML override of the selector table
    pub schema_path: Option<PathBuf>,
}

impl ExplorerEnvConfig {
    pub fn from_source(source: &EnvSource) -> Result<Self> {
        let defaults = HttpSettings::default();
        let timeout_secs = parse_or(source, "HTTP_TIMEOUT_SECS", defaults.timeout.as_secs())?;

        Ok(Self {
            base_url: source
                .get("EXPLORER_BASE_URL")
                .unwrap_or_else(|| "https://filfox.info/en/address".to_string()),
            http: HttpSettings {
                timeout: Duration::from_secs(timeout_secs),
                connect_timeout: defaults.connect_timeout,
                max_retries: parse_or(source, "HTTP_MAX_RETRIES", defaults.max_retries)?,
            },
            schema_path: source.get("EXTRACTION_SCHEMA").map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explorer_config_defaults() {
        let config = ExplorerEnvConfig::from_source(&EnvSource::empty()).unwrap();
        assert_eq!(config.base_url, "https://filfox.info/en/address");
        assert_eq!(config.http.timeout, Duration::from_secs(30));
        assert_eq!(config.http.max_retries, 3);
        assert!(config.schema_path.is_none());
    }

    #[test]
    fn test_explorer_config_overrides() {
        let source = EnvSource::from_pairs(&[
            ("EXPLORER_BASE_URL", "http://localhost:8080/address"),
            ("HTTP_MAX_RETRIES", "0"),
            ("EXTRACTION_SCHEMA", "schema.toml"),
        ]);
        let config = ExplorerEnvConfig::from_source(&source).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/address");
        assert_eq!(config.http.max_retries, 0);
        assert_eq!(config.schema_path, Some(PathBuf::from("schema.toml")));
    }

    #[test]
    fn test_malformed_timeout_is_error() {
        let source = EnvSource::from_pairs(&[("HTTP_TIMEOUT_SECS", "soon")]);
        assert!(ExplorerEnvConfig::from_source(&source).is_err());
    }
}
