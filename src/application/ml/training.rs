//! Grid-searched training of the reputation model.
//!
//! Rows are shuffled into a train/test split with the caller's seed, every
//! grid candidate is scored by k-fold cross-validation on the training rows,
//! and the winner is refit on all training rows and evaluated on the test rows.

use super::cross_validation::{kfold_ranges, split_fold, test_size, train_test_split};
use super::evaluation::{
    CandidateScore, EvaluationReport, mean_squared_error, r2_score, select_best,
};
use super::grid::{Hyperparameters, ParameterGrid};
use super::smartcore_predictor::{ForestPipeline, ReputationModel};
use crate::domain::errors::{DatasetError, TrainingError};
use crate::domain::miner::TrainingSample;
use rayon::prelude::*;
use tracing::{debug, info};

/// Minimum rows each cross-validation fold must receive
const MIN_ROWS_PER_FOLD: usize = 2;

/// Training run settings
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    pub seed: u64,
    pub test_fraction: f64,
    pub cv_folds: usize,
    pub grid: ParameterGrid,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            test_fraction: 0.2,
            cv_folds: 3,
            grid: ParameterGrid::default(),
        }
    }
}

pub struct TrainingPipeline {
    config: TrainingConfig,
}

impl TrainingPipeline {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Fits a model on `samples` and reports its held-out accuracy.
    pub fn train(
        &self,
        samples: &[TrainingSample],
    ) -> Result<(ReputationModel, EvaluationReport), TrainingError> {
        self.validate_config()?;
        validate_samples(samples, self.config.test_fraction, self.config.cv_folds)?;

        let split = train_test_split(samples.len(), self.config.test_fraction, self.config.seed);
        let (x_train, y_train) = columns(samples, &split.train);
        let (x_test, y_test) = columns(samples, &split.test);

        info!(
            "Training on {} samples, holding out {} (seed={})",
            x_train.len(),
            x_test.len(),
            self.config.seed
        );

        let candidates = self.search(&x_train, &y_train)?;
        let best = select_best(&candidates)
            .ok_or_else(|| TrainingError::InvalidConfig {
                reason: "parameter grid is empty".to_string(),
            })?
            .clone();

        info!(
            "GridSearch: best {} (CV MSE={:.4})",
            best.hyperparameters, best.mean_cv_mse
        );

        let pipeline =
            ForestPipeline::fit(&x_train, &y_train, &best.hyperparameters, self.config.seed)?;
        let model =
            ReputationModel::new(pipeline, best.hyperparameters, self.config.seed, x_train.len());

        let y_pred = model
            .predict_rows(&x_test)
            .map_err(|e| TrainingError::Fit {
                reason: e.to_string(),
            })?;
        let report = EvaluationReport {
            best: best.hyperparameters,
            best_cv_mse: best.mean_cv_mse,
            test_mse: mean_squared_error(&y_test, &y_pred),
            test_r2: r2_score(&y_test, &y_pred),
            train_size: x_train.len(),
            test_size: x_test.len(),
            seed: self.config.seed,
            candidates,
        };

        info!(
            "OOS Test (n={}): MSE={:.4}, R²={:.4}",
            report.test_size, report.test_mse, report.test_r2
        );

        Ok((model, report))
    }

    /// Scores every grid candidate. Candidates run in parallel; the output
    /// keeps grid order.
    fn search(
        &self,
        x: &[Vec<f64>],
        y: &[f64],
    ) -> Result<Vec<CandidateScore>, TrainingError> {
        let combinations = self.config.grid.combinations();
        info!(
            "GridSearch: Starting with {} parameter combinations, {}-fold CV",
            combinations.len(),
            self.config.cv_folds
        );

        combinations
            .into_par_iter()
            .map(|hp| self.cross_validate(x, y, hp))
            .collect()
    }

    fn cross_validate(
        &self,
        x: &[Vec<f64>],
        y: &[f64],
        hyperparameters: Hyperparameters,
    ) -> Result<CandidateScore, TrainingError> {
        let mut fold_mse = Vec::with_capacity(self.config.cv_folds);

        for fold in kfold_ranges(x.len(), self.config.cv_folds) {
            let (x_fit, x_val) = split_fold(x, &fold);
            let (y_fit, y_val) = split_fold(y, &fold);

            let pipeline = ForestPipeline::fit(&x_fit, &y_fit, &hyperparameters, self.config.seed)?;
            let pred = pipeline
                .predict_rows(&x_val)
                .map_err(|reason| TrainingError::Fit { reason })?;
            fold_mse.push(mean_squared_error(&y_val, &pred));
        }

        let score = CandidateScore::new(hyperparameters, fold_mse);
        debug!(
            "GridSearch: {} -> CV MSE={:.4}",
            score.hyperparameters, score.mean_cv_mse
        );
        Ok(score)
    }

    fn validate_config(&self) -> Result<(), TrainingError> {
        let config = &self.config;
        if config.cv_folds < 2 {
            return Err(TrainingError::InvalidConfig {
                reason: format!("cv_folds must be at least 2, got {}", config.cv_folds),
            });
        }
        if !(config.test_fraction > 0.0 && config.test_fraction < 1.0) {
            return Err(TrainingError::InvalidConfig {
                reason: format!(
                    "test_fraction must be in (0, 1), got {}",
                    config.test_fraction
                ),
            });
        }
        if config.grid.is_empty() {
            return Err(TrainingError::InvalidConfig {
                reason: "parameter grid is empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for TrainingPipeline {
    fn default() -> Self {
        Self::new(TrainingConfig::default())
    }
}

/// Checks the dataset is non-empty, finite and large enough to split.
fn validate_samples(
    samples: &[TrainingSample],
    test_fraction: f64,
    cv_folds: usize,
) -> Result<(), DatasetError> {
    if samples.is_empty() {
        return Err(DatasetError::Empty);
    }
    if let Some(row) = samples.iter().position(|s| !s.is_finite()) {
        return Err(DatasetError::InvalidValue {
            row,
            column: "*".to_string(),
            value: "non-finite value".to_string(),
        });
    }

    let n = samples.len();
    let test = test_size(n, test_fraction).min(n);
    let train = n - test;
    let required_train = MIN_ROWS_PER_FOLD * cv_folds;
    if test == 0 || train < required_train {
        return Err(DatasetError::TooSmall {
            samples: n,
            train,
            test,
            required_train,
        });
    }
    Ok(())
}

fn columns(samples: &[TrainingSample], indices: &[usize]) -> (Vec<Vec<f64>>, Vec<f64>) {
    indices
        .iter()
        .map(|&i| (samples[i].features(), samples[i].reputation_score))
        .unzip()
}
