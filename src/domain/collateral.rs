//! Collateral sizing from a predicted reputation score.
//!
//! The requirement shrinks linearly as reputation rises but never drops
//! below a fixed share of the loan. Scores above the scale produce a
//! negative factor, in which case the floor applies.

use crate::domain::errors::CollateralError;
use serde::{Deserialize, Serialize};

/// Collateral policy parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollateralPolicy {
    /// Minimum collateral as a fraction of the loan (0.2 = 20%)
    pub min_collateral_ratio: f64,
    /// Score at which the linear factor reaches zero
    pub score_scale: f64,
}

impl Default for CollateralPolicy {
    fn default() -> Self {
        Self {
            min_collateral_ratio: 0.2,
            score_scale: 1000.0,
        }
    }
}

/// Outcome of sizing a loan for one miner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollateralResult {
    pub predicted_score: f64,
    pub loan_amount: f64,
    pub required_collateral: f64,
}

impl CollateralPolicy {
    /// Required collateral for `loan_amount` at the given reputation score.
    pub fn required_collateral(&self, score: f64, loan_amount: f64) -> Result<f64, CollateralError> {
        if !loan_amount.is_finite() || loan_amount < 0.0 {
            return Err(CollateralError::InvalidLoan {
                amount: loan_amount,
            });
        }
        if !score.is_finite() {
            return Err(CollateralError::InvalidScore { score });
        }

        let min_collateral = loan_amount * self.min_collateral_ratio;
        let collateral_factor = 1.0 - (score / self.score_scale);

        Ok(min_collateral.max(loan_amount * collateral_factor))
    }

    pub fn assess(&self, score: f64, loan_amount: f64) -> Result<CollateralResult, CollateralError> {
        let required_collateral = self.required_collateral(score, loan_amount)?;
        Ok(CollateralResult {
            predicted_score: score,
            loan_amount,
            required_collateral,
        })
    }
}

/// Parses a user-supplied loan amount.
pub fn parse_loan_amount(raw: &str) -> Result<f64, CollateralError> {
    let amount: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CollateralError::NonNumericLoan {
            value: raw.to_string(),
        })?;

    if !amount.is_finite() || amount < 0.0 {
        return Err(CollateralError::InvalidLoan { amount });
    }
    Ok(amount)
}

/// Collateral under the default policy.
pub fn calculate_collateral(score: f64, loan_amount: f64) -> Result<f64, CollateralError> {
    CollateralPolicy::default().required_collateral(score, loan_amount)
}
