use super::grid::Hyperparameters;
use super::scaler::StandardScaler;
use crate::domain::errors::{PredictionError, TrainingError};
use crate::domain::miner::FeatureRecord;
use crate::domain::ml::feature_registry::{FEATURE_NAMES, features_to_f64_vector};
use crate::domain::ports::ReputationPredictor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

pub type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Standard scaler feeding a random forest, fitted together.
#[derive(Serialize, Deserialize)]
pub struct ForestPipeline {
    scaler: StandardScaler,
    forest: Forest,
}

impl ForestPipeline {
    /// Fits the scaler on `x`, then the forest on the scaled rows.
    /// `seed` drives bootstrap sampling so refits are reproducible.
    pub fn fit(
        x: &[Vec<f64>],
        y: &Vec<f64>,
        hyperparameters: &Hyperparameters,
        seed: u64,
    ) -> Result<Self, TrainingError> {
        let scaler = StandardScaler::fit(x);
        let x_matrix = DenseMatrix::from_2d_vec(&scaler.transform(x)).map_err(|e| {
            TrainingError::Fit {
                reason: format!("Matrix error: {}", e),
            }
        })?;

        let mut params = RandomForestRegressorParameters::default()
            .with_n_trees(hyperparameters.n_trees)
            .with_min_samples_split(hyperparameters.min_samples_split);
        params.max_depth = hyperparameters.max_depth;
        // Regression forests split on every feature
        params.m = Some(scaler.n_features());
        params.seed = seed;

        let forest = RandomForestRegressor::fit(&x_matrix, y, params).map_err(|e| {
            TrainingError::Fit {
                reason: format!("Training error: {}", e),
            }
        })?;

        Ok(Self { scaler, forest })
    }

    pub fn predict_rows(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, String> {
        let x_matrix = DenseMatrix::from_2d_vec(&self.scaler.transform(rows))
            .map_err(|e| format!("Matrix creation failed: {}", e))?;
        self.forest
            .predict(&x_matrix)
            .map_err(|e| format!("Prediction failed: {}", e))
    }
}

/// Provenance of a fitted model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub feature_names: Vec<String>,
    pub seed: u64,
    pub training_samples: usize,
    pub trained_at: DateTime<Utc>,
}

/// Fitted reputation model: scaler, forest and the hyperparameters that won the search.
///
/// Only the training pipeline builds new instances; saved models are
/// restored through serde.
#[derive(Serialize, Deserialize)]
pub struct ReputationModel {
    pipeline: ForestPipeline,
    hyperparameters: Hyperparameters,
    metadata: ModelMetadata,
}

impl ReputationModel {
    pub(crate) fn new(
        pipeline: ForestPipeline,
        hyperparameters: Hyperparameters,
        seed: u64,
        training_samples: usize,
    ) -> Self {
        Self {
            pipeline,
            hyperparameters,
            metadata: ModelMetadata {
                feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
                seed,
                training_samples,
                trained_at: Utc::now(),
            },
        }
    }

    pub fn hyperparameters(&self) -> &Hyperparameters {
        &self.hyperparameters
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Scores raw feature rows in model input order.
    pub fn predict_rows(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, PredictionError> {
        self.pipeline
            .predict_rows(rows)
            .map_err(|reason| PredictionError::Model { reason })
    }
}

impl ReputationPredictor for ReputationModel {
    fn predict(&self, features: &FeatureRecord) -> Result<f64, PredictionError> {
        let input_vec = features_to_f64_vector(features)?;
        let predictions = self.predict_rows(&[input_vec])?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| PredictionError::Model {
                reason: "No prediction returned".to_string(),
            })
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest"
    }

    fn version(&self) -> &str {
        "v1.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::miner::FeatureValue;

    fn linear_rows(n: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
        let x: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                let f = i as f64;
                vec![f * 10.0, f, 100.0 + f, 90.0 + f, (i % 3) as f64, (i % 5) as f64]
            })
            .collect();
        let y = x.iter().map(|r| r[1] * 20.0).collect();
        (x, y)
    }

    fn small_hp() -> Hyperparameters {
        Hyperparameters {
            n_trees: 10,
            max_depth: None,
            min_samples_split: 2,
        }
    }

    fn record(win_count: FeatureValue) -> FeatureRecord {
        FeatureRecord {
            address: "f01".to_string(),
            adjusted_power: FeatureValue::Integer(200),
            win_count,
            sector_total: FeatureValue::Integer(120),
            sector_active: FeatureValue::Integer(110),
            sector_faults: FeatureValue::Integer(2),
            sector_recoveries: FeatureValue::Integer(0),
        }
    }

    #[test]
    fn test_pipeline_fits_monotone_target() {
        let (x, y) = linear_rows(40);
        let pipeline = ForestPipeline::fit(&x, &y, &small_hp(), 42).unwrap();

        let preds = pipeline
            .predict_rows(&[x[2].clone(), x[37].clone()])
            .unwrap();
        assert!(preds[0] < preds[1]);
    }

    #[test]
    fn test_predict_rejects_text_feature() {
        let (x, y) = linear_rows(20);
        let pipeline = ForestPipeline::fit(&x, &y, &small_hp(), 1).unwrap();
        let model = ReputationModel::new(pipeline, small_hp(), 1, 20);

        let err = model
            .predict(&record(FeatureValue::Text("n/a".into())))
            .unwrap_err();
        assert!(matches!(
            err,
            PredictionError::Type(ref e) if e.feature == "WinCount"
        ));

        let score = model.predict(&record(FeatureValue::Integer(12))).unwrap();
        assert!(score.is_finite());
    }

    #[test]
    fn test_model_metadata() {
        let (x, y) = linear_rows(20);
        let pipeline = ForestPipeline::fit(&x, &y, &small_hp(), 9).unwrap();
        let model = ReputationModel::new(pipeline, small_hp(), 9, 20);

        assert_eq!(model.metadata().seed, 9);
        assert_eq!(model.metadata().feature_names.len(), 6);
        assert_eq!(model.hyperparameters().n_trees, 10);
        assert_eq!(model.name(), "SmartCore Random Forest");
    }
}
