use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Per-column standardization to zero mean and unit variance.
///
/// Uses the population standard deviation. Constant columns get a scale of
/// 1 so they map to zero instead of dividing by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    /// Fits column statistics on `rows`. All rows must have the same width.
    pub fn fit(rows: &[Vec<f64>]) -> Self {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let mut means = Vec::with_capacity(width);
        let mut scales = Vec::with_capacity(width);

        for col in 0..width {
            let column: Vec<f64> = rows.iter().map(|row| row[col]).collect();
            let mean = column.iter().mean();
            let std_dev = column.iter().population_std_dev();

            means.push(if mean.is_finite() { mean } else { 0.0 });
            scales.push(if std_dev.is_finite() && std_dev > 0.0 {
                std_dev
            } else {
                1.0
            });
        }

        Self { means, scales }
    }

    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(value, (mean, scale))| (value - mean) / scale)
            .collect()
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }

    pub fn n_features(&self) -> usize {
        self.means.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_transform_standardizes() {
        let rows = vec![vec![1.0, 10.0], vec![2.0, 20.0], vec![3.0, 30.0]];
        let scaler = StandardScaler::fit(&rows);
        let out = scaler.transform(&rows);

        for col in 0..2 {
            let mean: f64 = out.iter().map(|r| r[col]).sum::<f64>() / 3.0;
            let var: f64 = out.iter().map(|r| (r[col] - mean).powi(2)).sum::<f64>() / 3.0;
            assert!(mean.abs() < 1e-12);
            assert!((var - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_constant_column_maps_to_zero() {
        let rows = vec![vec![5.0, 1.0], vec![5.0, 3.0]];
        let scaler = StandardScaler::fit(&rows);

        assert_eq!(scaler.transform_row(&[5.0, 2.0]), vec![0.0, 0.0]);
        assert_eq!(scaler.transform_row(&[7.0, 3.0]), vec![2.0, 1.0]);
    }

    #[test]
    fn test_statistics_come_from_fit_rows_only() {
        let scaler = StandardScaler::fit(&[vec![0.0], vec![2.0]]);
        // mean 1, population std 1
        assert_eq!(scaler.transform_row(&[101.0]), vec![100.0]);
        assert_eq!(scaler.n_features(), 1);
    }
}
