use thiserror::Error;

/// Errors raised while retrieving an explorer page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid explorer URL for {address}: {reason}")]
    InvalidUrl { address: String, reason: String },

    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// Errors raised when a page does not match the extraction schema
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Invalid selector for region {region}: {selector} ({reason})")]
    InvalidSelector {
        region: &'static str,
        selector: String,
        reason: String,
    },

    #[error("Region {region} not found (selector: {selector})")]
    MissingRegion {
        region: &'static str,
        selector: String,
    },

    #[error("Region {region} contains no usable token")]
    EmptyToken { region: &'static str },

    #[error("Expected {expected} sector values, found {found}")]
    InsufficientSectors { expected: usize, found: usize },
}

/// Errors related to the historical training dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Dataset is missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Invalid value in row {row}, column {column}: {value:?}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Dataset is empty")]
    Empty,

    #[error(
        "Dataset too small: {samples} samples leave {train} training rows (need {required_train}) and {test} test rows (need 1)"
    )]
    TooSmall {
        samples: usize,
        train: usize,
        test: usize,
        required_train: usize,
    },
}

/// A numeric feature arrived as unconverted text
#[derive(Debug, Error, PartialEq)]
#[error("Feature {feature} is not numeric: {value:?}")]
pub struct FeatureTypeError {
    pub feature: &'static str,
    pub value: String,
}

/// Errors related to collateral sizing inputs
#[derive(Debug, Error, PartialEq)]
pub enum CollateralError {
    #[error("Loan amount is not a number: {value:?}")]
    NonNumericLoan { value: String },

    #[error("Loan amount must be finite and nonnegative, got {amount}")]
    InvalidLoan { amount: f64 },

    #[error("Reputation score must be finite, got {score}")]
    InvalidScore { score: f64 },
}

/// Errors raised by the training pipeline
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("Invalid training configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Model fitting failed: {reason}")]
    Fit { reason: String },
}

/// Errors raised while scoring a single miner
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error(transparent)]
    Type(#[from] FeatureTypeError),

    #[error("Model inference failed: {reason}")]
    Model { reason: String },
}

/// Errors raised when persisting or restoring a fitted model
#[derive(Debug, Error)]
pub enum ModelStoreError {
    #[error("Model file {path} is not readable: {reason}")]
    Io { path: String, reason: String },

    #[error("Model file {path} is corrupt: {reason}")]
    Format { path: String, reason: String },
}

/// Errors raised by the end-to-end assessment flow
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error(transparent)]
    Collateral(#[from] CollateralError),
}
