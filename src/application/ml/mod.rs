//! Reputation model training and inference.

pub mod cross_validation;
pub mod evaluation;
pub mod grid;
pub mod scaler;
pub mod smartcore_predictor;
pub mod training;

pub use evaluation::EvaluationReport;
pub use grid::{Hyperparameters, ParameterGrid};
pub use smartcore_predictor::ReputationModel;
pub use training::{TrainingConfig, TrainingPipeline};
