use crate::domain::errors::{FetchError, PredictionError};
use crate::domain::miner::FeatureRecord;
use async_trait::async_trait;

/// Source of raw explorer pages
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetches the page describing `address`.
    async fn fetch(&self, address: &str) -> Result<String, FetchError>;
}

/// Interface for fitted reputation models
pub trait ReputationPredictor: Send + Sync {
    /// Predict the reputation score. The output is not clamped to any range.
    fn predict(&self, features: &FeatureRecord) -> Result<f64, PredictionError>;

    /// Get model name/type
    fn name(&self) -> &str;

    /// Get model version/id
    fn version(&self) -> &str;
}
