//! Training configuration parsing from environment variables.

use super::{EnvSource, parse_or};
use crate::application::ml::{ParameterGrid, TrainingConfig};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Training environment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingEnvConfig {
    pub dataset_path: PathBuf,
    pub model_path: PathBuf,
    pub seed: u64,
    pub test_fraction: f64,
    pub cv_folds: usize,
    pub grid_path: Option<PathBuf>,
}

impl TrainingEnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_source(&EnvSource::process())
    }

    pub fn from_source(source: &EnvSource) -> Result<Self> {
        Ok(Self {
            dataset_path: PathBuf::from(
                source
                    .get("DATASET_PATH")
                    .unwrap_or_else(|| "generated_data.csv".to_string()),
            ),
            model_path: PathBuf::from(
                source
                    .get("MODEL_PATH")
                    .unwrap_or_else(|| "data/model/reputation_model.json".to_string()),
            ),
            seed: parse_or(source, "TRAINING_SEED", 42)?,
            test_fraction: parse_or(source, "TEST_FRACTION", 0.2)?,
            cv_folds: parse_or(source, "CV_FOLDS", 3)?,
            grid_path: source.get("GRID_CONFIG").map(PathBuf::from),
        })
    }

    /// Builds the pipeline settings, loading the grid file when one is set.
    pub fn training_config(&self) -> Result<TrainingConfig> {
        let grid = match &self.grid_path {
            Some(path) => ParameterGrid::from_toml_file(path)
                .with_context(|| format!("Invalid GRID_CONFIG {:?}", path))?,
            None => ParameterGrid::default(),
        };

        Ok(TrainingConfig {
            seed: self.seed,
            test_fraction: self.test_fraction,
            cv_folds: self.cv_folds,
            grid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_config_defaults() {
        let config = TrainingEnvConfig::from_source(&EnvSource::empty()).unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("generated_data.csv"));
        assert_eq!(config.seed, 42);
        assert_eq!(config.cv_folds, 3);

        let training = config.training_config().unwrap();
        assert_eq!(training, TrainingConfig::default());
    }

    #[test]
    fn test_training_config_overrides() {
        let source = EnvSource::from_pairs(&[("TRAINING_SEED", "7"), ("TEST_FRACTION", "0.25")]);
        let config = TrainingEnvConfig::from_source(&source).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.test_fraction, 0.25);
    }

    #[test]
    fn test_missing_grid_file_is_error() {
        let source = EnvSource::from_pairs(&[("GRID_CONFIG", "/nonexistent/grid.toml")]);
        let config = TrainingEnvConfig::from_source(&source).unwrap();
        assert!(config.training_config().is_err());
    }
}
