use crate::domain::errors::FeatureTypeError;
use crate::domain::miner::{FeatureRecord, FeatureValue, Metric};

/// Ordered list of feature names.
/// This order MUST match the column order the model was trained with.
/// Any change here is a breaking change for saved models.
pub const FEATURE_NAMES: &[&str] = &[
    "AdjustedPower",
    "WinCount",
    "SectorTotal",
    "SectorActive",
    "SectorFaults",
    "SectorRecoveries",
];

/// Dataset column holding the training label.
pub const LABEL_NAME: &str = "ReputationScore";

/// Converts a normalized record into the model input vector.
/// The first metric still held as text is reported as a type error.
pub fn features_to_f64_vector(record: &FeatureRecord) -> Result<Vec<f64>, FeatureTypeError> {
    Metric::ALL
        .iter()
        .map(|metric| match record.get(*metric) {
            FeatureValue::Integer(v) => Ok(*v as f64),
            FeatureValue::Float(v) => Ok(*v),
            FeatureValue::Text(raw) => Err(FeatureTypeError {
                feature: metric.name(),
                value: raw.clone(),
            }),
        })
        .collect()
}
