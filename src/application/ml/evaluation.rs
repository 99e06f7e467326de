use super::grid::Hyperparameters;
use serde::{Deserialize, Serialize};

/// Mean squared error. Returns 0 for empty input.
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    let sq_err: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    sq_err / actual.len() as f64
}

/// Coefficient of determination.
///
/// When the targets are constant, a perfect fit scores 1 and anything else 0.
pub fn r2_score(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

/// Cross-validation outcome for one grid candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub hyperparameters: Hyperparameters,
    pub fold_mse: Vec<f64>,
    pub mean_cv_mse: f64,
}

impl CandidateScore {
    pub fn new(hyperparameters: Hyperparameters, fold_mse: Vec<f64>) -> Self {
        let mean_cv_mse = if fold_mse.is_empty() {
            f64::INFINITY
        } else {
            fold_mse.iter().sum::<f64>() / fold_mse.len() as f64
        };
        Self {
            hyperparameters,
            fold_mse,
            mean_cv_mse,
        }
    }

    /// Negative mean squared error; higher is better
    pub fn score(&self) -> f64 {
        -self.mean_cv_mse
    }
}

/// Returns the best-scoring candidate; the earliest one wins ties.
pub fn select_best(candidates: &[CandidateScore]) -> Option<&CandidateScore> {
    candidates.iter().fold(None, |best, candidate| match best {
        Some(current) if current.score() >= candidate.score() => Some(current),
        _ => Some(candidate),
    })
}

/// Summary of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub best: Hyperparameters,
    pub best_cv_mse: f64,
    pub test_mse: f64,
    pub test_r2: f64,
    pub train_size: usize,
    pub test_size: usize,
    pub seed: u64,
    pub candidates: Vec<CandidateScore>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hp(n_trees: usize) -> Hyperparameters {
        Hyperparameters {
            n_trees,
            max_depth: None,
            min_samples_split: 2,
        }
    }

    #[test]
    fn test_mse() {
        assert_eq!(mean_squared_error(&[1.0, 2.0, 3.0], &[1.0, 2.0, 5.0]), 4.0 / 3.0);
        assert_eq!(mean_squared_error(&[], &[]), 0.0);
    }

    #[test]
    fn test_r2_perfect_and_mean_predictor() {
        let y = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(r2_score(&y, &y), 1.0);
        assert!(r2_score(&y, &[2.5; 4]).abs() < 1e-12);
    }

    #[test]
    fn test_r2_constant_targets() {
        assert_eq!(r2_score(&[5.0, 5.0], &[5.0, 5.0]), 1.0);
        assert_eq!(r2_score(&[5.0, 5.0], &[4.0, 5.0]), 0.0);
    }

    #[test]
    fn test_select_best_prefers_lowest_error() {
        let candidates = vec![
            CandidateScore::new(hp(100), vec![4.0, 6.0]),
            CandidateScore::new(hp(200), vec![1.0, 3.0]),
            CandidateScore::new(hp(300), vec![2.0, 3.0]),
        ];
        let best = select_best(&candidates).unwrap();
        assert_eq!(best.hyperparameters.n_trees, 200);
        assert_eq!(best.mean_cv_mse, 2.0);
        assert_eq!(best.score(), -2.0);
    }

    #[test]
    fn test_select_best_tie_keeps_first() {
        let candidates = vec![
            CandidateScore::new(hp(100), vec![2.0]),
            CandidateScore::new(hp(200), vec![2.0]),
        ];
        assert_eq!(select_best(&candidates).unwrap().hyperparameters.n_trees, 100);
        assert!(select_best(&[]).is_none());
    }
}
