//! Collateral policy configuration parsing from environment variables.

use super::{EnvSource, parse_or};
use crate::domain::collateral::CollateralPolicy;
use anyhow::{Result, ensure};

/// Collateral environment configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollateralEnvConfig {
    pub policy: CollateralPolicy,
    pub default_loan_amount: f64,
}

impl CollateralEnvConfig {
    pub fn from_source(source: &EnvSource) -> Result<Self> {
        let defaults = CollateralPolicy::default();
        let policy = CollateralPolicy {
            min_collateral_ratio: parse_or(
                source,
                "MIN_COLLATERAL_RATIO",
                defaults.min_collateral_ratio,
            )?,
            score_scale: parse_or(source, "SCORE_SCALE", defaults.score_scale)?,
        };
        let default_loan_amount: f64 = parse_or(source, "DEFAULT_LOAN_AMOUNT", 1000.0)?;

        ensure!(
            (0.0..=1.0).contains(&policy.min_collateral_ratio),
            "MIN_COLLATERAL_RATIO must be within [0, 1], got {}",
            policy.min_collateral_ratio
        );
        ensure!(
            policy.score_scale.is_finite() && policy.score_scale > 0.0,
            "SCORE_SCALE must be positive, got {}",
            policy.score_scale
        );
        ensure!(
            default_loan_amount.is_finite() && default_loan_amount >= 0.0,
            "DEFAULT_LOAN_AMOUNT must be nonnegative, got {}",
            default_loan_amount
        );

        Ok(Self {
            policy,
            default_loan_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collateral_config_defaults() {
        let config = CollateralEnvConfig::from_source(&EnvSource::empty()).unwrap();
        assert_eq!(config.policy, CollateralPolicy::default());
        assert_eq!(config.default_loan_amount, 1000.0);
    }

    #[test]
    fn test_default_loan_amount_override() {
        let source = EnvSource::from_pairs(&[("DEFAULT_LOAN_AMOUNT", "2500.5")]);
        let config = CollateralEnvConfig::from_source(&source).unwrap();
        assert_eq!(config.default_loan_amount, 2500.5);

        let source = EnvSource::from_pairs(&[("DEFAULT_LOAN_AMOUNT", "-1")]);
        assert!(CollateralEnvConfig::from_source(&source).is_err());
    }

    #[test]
    fn test_out_of_range_ratio_rejected() {
        let source = EnvSource::from_pairs(&[("MIN_COLLATERAL_RATIO", "1.5")]);
        assert!(CollateralEnvConfig::from_source(&source).is_err());
    }

    #[test]
    fn test_zero_scale_rejected() {
        let source = EnvSource::from_pairs(&[("SCORE_SCALE", "0")]);
        assert!(CollateralEnvConfig::from_source(&source).is_err());
    }
}
