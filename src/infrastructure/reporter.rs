//! Console tables and JSON export for scrape, training and assessment results.

use crate::application::assessment::Assessment;
use crate::application::ml::EvaluationReport;
use crate::domain::miner::{FeatureRecord, Metric};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

const WIDTH: usize = 60;

/// Reporter for pipeline results.
#[derive(Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Prints the held-out metrics of a training run.
    pub fn print_evaluation(&self, report: &EvaluationReport) {
        println!("\n{}", "=".repeat(WIDTH));
        println!("  MODEL PERFORMANCE");
        println!("{}", "=".repeat(WIDTH));
        println!("{:<28} | {:>27}", "Metric", "Value");
        println!("{}", "-".repeat(WIDTH));
        println!("{:<28} | {:>27.4}", "Mean Squared Error", report.test_mse);
        println!("{:<28} | {:>27.4}", "R² Score", report.test_r2);
        println!("{:<28} | {:>27.4}", "Best CV MSE", report.best_cv_mse);
        println!("{:<28} | {:>27}", "Best Parameters", report.best.to_string());
        println!(
            "{:<28} | {:>27}",
            "Train / Test Rows",
            format!("{} / {}", report.train_size, report.test_size)
        );
        println!("{:<28} | {:>27}", "Seed", report.seed);
        println!("{}\n", "=".repeat(WIDTH));
    }

    /// Prints every grid candidate with its cross-validation error.
    pub fn print_candidates(&self, report: &EvaluationReport) {
        println!("{:<4} | {:<6} | {:<9} | {:<9} | {:>14}", "#", "Trees", "Depth", "MinSplit", "CV MSE");
        println!("{}", "-".repeat(WIDTH));
        for (i, candidate) in report.candidates.iter().enumerate() {
            let hp = &candidate.hyperparameters;
            let depth = hp
                .max_depth
                .map(|d| d.to_string())
                .unwrap_or_else(|| "None".to_string());
            let marker = if *hp == report.best { " *" } else { "" };
            println!(
                "{:<4} | {:<6} | {:<9} | {:<9} | {:>14.4}{}",
                i + 1,
                hp.n_trees,
                depth,
                hp.min_samples_split,
                candidate.mean_cv_mse,
                marker
            );
        }
        println!();
    }

    /// Prints a scraped and normalized miner record.
    pub fn print_features(&self, record: &FeatureRecord) {
        println!("\n{}", "=".repeat(WIDTH));
        println!("  MINER METRICS");
        println!("{}", "=".repeat(WIDTH));
        println!("{:<28} | {:>27}", "Address", record.address);
        for metric in Metric::ALL {
            println!("{:<28} | {:>27}", metric.name(), record.get(metric).to_string());
        }
        println!("{}\n", "=".repeat(WIDTH));
    }

    /// Prints the model prediction and collateral requirement.
    pub fn print_assessment(&self, assessment: &Assessment) {
        let collateral = &assessment.collateral;
        println!("\n{}", "=".repeat(WIDTH));
        println!("  MODEL PREDICTION");
        println!("{}", "=".repeat(WIDTH));
        println!("{:<28} | {:>27}", "Parameter", "Value");
        println!("{}", "-".repeat(WIDTH));
        println!("{:<28} | {:>27}", "Address", assessment.address());
        println!("{:<28} | {:>27.2}", "Reputation Score", collateral.predicted_score);
        println!("{:<28} | {:>27.2}", "Loan Amount", collateral.loan_amount);
        println!("{:<28} | {:>27.2}", "Collateral Required", collateral.required_collateral);
        println!("{}\n", "=".repeat(WIDTH));
    }

    /// Writes `value` as pretty JSON to `path`.
    pub fn export_json<T: Serialize>(&self, value: &T, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
        Ok(())
    }
}
