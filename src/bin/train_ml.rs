//! Trains the reputation model from a CSV of historical miner metrics.

use anyhow::{Context, Result};
use clap::Parser;
use minerscore::application::ml::{ParameterGrid, TrainingConfig, TrainingPipeline};
use minerscore::config::TrainingEnvConfig;
use minerscore::infrastructure::dataset::load_training_samples;
use minerscore::infrastructure::model_store::save_model;
use minerscore::infrastructure::reporter::ConsoleReporter;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to training data CSV (defaults to DATASET_PATH)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Path to output model file (defaults to MODEL_PATH)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Seed for the train/test split and the forest (defaults to TRAINING_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with parameter grid configuration (defaults to GRID_CONFIG)
    #[arg(long)]
    grid_config: Option<PathBuf>,

    /// Fraction of rows held out for testing (defaults to TEST_FRACTION)
    #[arg(long)]
    test_fraction: Option<f64>,

    /// Cross-validation folds per grid candidate (defaults to CV_FOLDS)
    #[arg(long)]
    cv_folds: Option<usize>,

    /// Print every grid candidate with its CV error
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let args = Args::parse();
    let env = TrainingEnvConfig::from_env().context("Failed to load training configuration")?;

    let input = args.input.unwrap_or_else(|| env.dataset_path.clone());
    let output = args.output.unwrap_or_else(|| env.model_path.clone());

    let mut config: TrainingConfig = env.training_config()?;
    if let Some(path) = &args.grid_config {
        config.grid = ParameterGrid::from_toml_file(path)
            .with_context(|| format!("Failed to load grid from {:?}", path))?;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(fraction) = args.test_fraction {
        config.test_fraction = fraction;
    }
    if let Some(folds) = args.cv_folds {
        config.cv_folds = folds;
    }

    info!("Loading training data from {:?}", input);
    let samples = load_training_samples(&input)?;

    info!(
        "Grid search over {} candidates with {}-fold CV",
        config.grid.len(),
        config.cv_folds
    );
    let (model, report) = TrainingPipeline::new(config).train(&samples)?;

    let reporter = ConsoleReporter::new();
    if args.verbose {
        reporter.print_candidates(&report);
    }
    reporter.print_evaluation(&report);

    save_model(&model, &output)?;
    println!("Done. Model saved to {:?}", output);
    Ok(())
}
