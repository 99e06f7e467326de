//! Configuration module for minerscore.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Explorer, Training, and Collateral.

mod collateral_config;
mod explorer_config;
mod training_config;

pub use collateral_config::CollateralEnvConfig;
pub use explorer_config::ExplorerEnvConfig;
pub use training_config::TrainingEnvConfig;

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env;
use std::str::FromStr;

/// Source of configuration values: the process environment or a fixed map.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    overrides: Option<HashMap<String, String>>,
}

impl EnvSource {
    /// Reads from the process environment.
    pub fn process() -> Self {
        Self { overrides: None }
    }

    /// A source with no values set; every key falls back to its default.
    pub fn empty() -> Self {
        Self {
            overrides: Some(HashMap::new()),
        }
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            overrides: Some(
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        }
    }

    /// Value of `key`. Blank values count as unset.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match &self.overrides {
            Some(map) => map.get(key).cloned(),
            None => env::var(key).ok(),
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

/// Parses `key` if set, otherwise returns `default`. Malformed values are errors.
pub(crate) fn parse_or<T>(source: &EnvSource, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match source.get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .context(format!("Failed to parse {}", key)),
        None => Ok(default),
    }
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub explorer: ExplorerEnvConfig,
    pub training: TrainingEnvConfig,
    pub collateral: CollateralEnvConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_source(&EnvSource::process())
    }

    pub fn from_source(source: &EnvSource) -> Result<Self> {
        Ok(Self {
            explorer: ExplorerEnvConfig::from_source(source)?,
            training: TrainingEnvConfig::from_source(source)?,
            collateral: CollateralEnvConfig::from_source(source)?,
        })
    }
}
