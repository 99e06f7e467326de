//! End-to-end miner assessment: page → features → score → collateral.

use crate::application::extraction::MetricExtractor;
use crate::application::normalizer::normalize;
use crate::domain::collateral::{CollateralPolicy, CollateralResult};
use crate::domain::errors::AssessmentError;
use crate::domain::miner::{FeatureRecord, RawMinerRecord};
use crate::domain::ports::{DocumentFetcher, ReputationPredictor};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Fetches explorer pages and reduces them to feature records.
pub struct MinerScraper {
    fetcher: Arc<dyn DocumentFetcher>,
    extractor: MetricExtractor,
}

impl MinerScraper {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, extractor: MetricExtractor) -> Self {
        Self { fetcher, extractor }
    }

    /// Fetches and extracts without typing the values.
    pub async fn scrape_raw(&self, address: &str) -> Result<RawMinerRecord, AssessmentError> {
        let content = self.fetcher.fetch(address).await?;
        Ok(self.extractor.extract_from_html(&content, address)?)
    }

    pub async fn scrape(&self, address: &str) -> Result<FeatureRecord, AssessmentError> {
        let raw = self.scrape_raw(address).await?;
        let features = normalize(&raw);
        info!("Scraped metrics for {}", address);
        Ok(features)
    }
}

/// Score and collateral for one miner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub features: FeatureRecord,
    pub collateral: CollateralResult,
}

impl Assessment {
    pub fn address(&self) -> &str {
        &self.features.address
    }
}

/// Scores feature records and sizes their collateral.
pub struct AssessmentService {
    predictor: Arc<dyn ReputationPredictor>,
    policy: CollateralPolicy,
}

impl AssessmentService {
    pub fn new(predictor: Arc<dyn ReputationPredictor>, policy: CollateralPolicy) -> Self {
        Self { predictor, policy }
    }

    /// Predicts the score and derives the collateral for `loan_amount`.
    pub fn evaluate(
        &self,
        features: FeatureRecord,
        loan_amount: f64,
    ) -> Result<Assessment, AssessmentError> {
        let score = self.predictor.predict(&features)?;
        let collateral = self.policy.assess(score, loan_amount)?;

        info!(
            "Assessed {} with {}: score={:.2}, collateral={:.2} for loan {:.2}",
            features.address,
            self.predictor.name(),
            score,
            collateral.required_collateral,
            loan_amount
        );

        Ok(Assessment {
            features,
            collateral,
        })
    }

    /// Runs the full pipeline for `address`.
    pub async fn assess(
        &self,
        scraper: &MinerScraper,
        address: &str,
        loan_amount: f64,
    ) -> Result<Assessment, AssessmentError> {
        let features = scraper.scrape(address).await?;
        self.evaluate(features, loan_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::PredictionError;
    use crate::domain::miner::FeatureValue;
    use crate::domain::ml::feature_registry::features_to_f64_vector;

    /// Scores a miner by its win count alone.
    struct WinCountPredictor;

    impl ReputationPredictor for WinCountPredictor {
        fn predict(&self, features: &FeatureRecord) -> Result<f64, PredictionError> {
            Ok(features_to_f64_vector(features)?[1] * 100.0)
        }

        fn name(&self) -> &str {
            "win-count"
        }

        fn version(&self) -> &str {
            "test"
        }
    }

    fn features(win_count: FeatureValue) -> FeatureRecord {
        FeatureRecord {
            address: "f0777".to_string(),
            adjusted_power: FeatureValue::Integer(1),
            win_count,
            sector_total: FeatureValue::Integer(1),
            sector_active: FeatureValue::Integer(1),
            sector_faults: FeatureValue::Integer(0),
            sector_recoveries: FeatureValue::Integer(0),
        }
    }

    #[test]
    fn test_evaluate_sizes_collateral() {
        let service = AssessmentService::new(Arc::new(WinCountPredictor), CollateralPolicy::default());
        let assessment = service
            .evaluate(features(FeatureValue::Integer(5)), 1000.0)
            .unwrap();

        assert_eq!(assessment.address(), "f0777");
        assert_eq!(assessment.collateral.predicted_score, 500.0);
        assert!((assessment.collateral.required_collateral - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_evaluate_surfaces_type_error() {
        let service = AssessmentService::new(Arc::new(WinCountPredictor), CollateralPolicy::default());
        let err = service
            .evaluate(features(FeatureValue::Text("lots".into())), 1000.0)
            .unwrap_err();

        assert!(matches!(
            err,
            AssessmentError::Prediction(PredictionError::Type(_))
        ));
    }

    #[test]
    fn test_evaluate_rejects_negative_loan() {
        let service = AssessmentService::new(Arc::new(WinCountPredictor), CollateralPolicy::default());
        let err = service
            .evaluate(features(FeatureValue::Integer(5)), -10.0)
            .unwrap_err();

        assert!(matches!(err, AssessmentError::Collateral(_)));
    }
}
