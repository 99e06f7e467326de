//! minerscore command line: scrape a miner, score it, size its collateral.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use minerscore::application::assessment::{AssessmentService, MinerScraper};
use minerscore::application::extraction::{ExtractionSchema, MetricExtractor};
use minerscore::application::ml::{ReputationModel, TrainingConfig, TrainingPipeline};
use minerscore::application::normalizer::normalize_features;
use minerscore::config::{Config, TrainingEnvConfig};
use minerscore::domain::collateral::parse_loan_amount;
use minerscore::domain::miner::FeatureRecord;
use minerscore::infrastructure::ExplorerFetcher;
use minerscore::infrastructure::dataset::load_training_samples;
use minerscore::infrastructure::model_store::{load_model, save_model};
use minerscore::infrastructure::reporter::ConsoleReporter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Filecoin miner reputation and loan collateral", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a miner page and save its normalized metrics as JSON
    Scrape {
        /// Miner address (e.g. f01234)
        address: String,

        /// Output JSON file
        #[arg(short, long, default_value = "newminer.json")]
        output: PathBuf,
    },
    /// Score a miner record and compute the collateral for a loan
    Predict {
        /// Miner record as a JSON string or a path to a JSON file
        miner: String,

        /// Saved model (defaults to MODEL_PATH)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Training CSV used when no saved model exists (defaults to DATASET_PATH)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Requested loan amount (defaults to DEFAULT_LOAN_AMOUNT)
        #[arg(long)]
        loan_amount: Option<String>,
    },
    /// Scrape, score and size collateral in one step
    Assess {
        /// Miner address (e.g. f01234)
        address: String,

        /// Requested loan amount (defaults to DEFAULT_LOAN_AMOUNT)
        #[arg(long)]
        loan_amount: Option<String>,

        /// Also write the assessment as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let reporter = ConsoleReporter::new();

    match cli.command {
        Commands::Scrape { address, output } => {
            let scraper = build_scraper(&config)?;
            let record = scraper.scrape(&address).await?;

            reporter.print_features(&record);
            reporter.export_json(&record, &output)?;
            info!("Miner metrics written to {:?}", output);
        }
        Commands::Predict {
            miner,
            model,
            dataset,
            loan_amount,
        } => {
            let record = normalize_features(read_miner_record(&miner)?);
            let loan_amount = resolve_loan_amount(&config, loan_amount.as_deref())?;
            let model = load_or_train_model(&config.training, model, dataset).await?;

            let service = AssessmentService::new(Arc::new(model), config.collateral.policy);
            let assessment = service.evaluate(record, loan_amount)?;
            reporter.print_assessment(&assessment);
        }
        Commands::Assess {
            address,
            loan_amount,
            output,
        } => {
            let loan_amount = resolve_loan_amount(&config, loan_amount.as_deref())?;
            let scraper = build_scraper(&config)?;
            let model = load_or_train_model(&config.training, None, None).await?;

            let service = AssessmentService::new(Arc::new(model), config.collateral.policy);
            let assessment = service.assess(&scraper, &address, loan_amount).await?;

            reporter.print_features(&assessment.features);
            reporter.print_assessment(&assessment);
            if let Some(path) = output {
                reporter.export_json(&assessment, &path)?;
            }
        }
    }

    Ok(())
}

fn build_scraper(config: &Config) -> Result<MinerScraper> {
    let schema = match &config.explorer.schema_path {
        Some(path) => ExtractionSchema::from_toml_file(path)?,
        None => ExtractionSchema::default(),
    };
    let extractor = MetricExtractor::new(&schema)?;
    let fetcher = ExplorerFetcher::new(&config.explorer.base_url, &config.explorer.http)?;

    Ok(MinerScraper::new(Arc::new(fetcher), extractor))
}

fn resolve_loan_amount(config: &Config, raw: Option<&str>) -> Result<f64> {
    match raw {
        Some(raw) => Ok(parse_loan_amount(raw)?),
        None => Ok(config.collateral.default_loan_amount),
    }
}

/// Accepts inline JSON or a path to a JSON file.
fn read_miner_record(input: &str) -> Result<FeatureRecord> {
    let trimmed = input.trim_start();
    let content = if trimmed.starts_with('{') {
        input.to_string()
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read miner record {:?}", input))?
    };

    serde_json::from_str(&content).context("Failed to parse miner record JSON")
}

async fn load_or_train_model(
    training: &TrainingEnvConfig,
    model_path: Option<PathBuf>,
    dataset_path: Option<PathBuf>,
) -> Result<ReputationModel> {
    let model_path = model_path.unwrap_or_else(|| training.model_path.clone());
    if model_path.exists() {
        return Ok(load_model(&model_path)?);
    }

    warn!("No saved model at {:?}, training from the dataset", model_path);
    let dataset_path = dataset_path.unwrap_or_else(|| training.dataset_path.clone());
    let training_config = training.training_config()?;

    let model = tokio::task::spawn_blocking(move || {
        train_and_save(&dataset_path, &model_path, training_config)
    })
    .await
    .context("Training task failed")??;
    Ok(model)
}

fn train_and_save(
    dataset_path: &Path,
    model_path: &Path,
    config: TrainingConfig,
) -> Result<ReputationModel> {
    let samples = load_training_samples(dataset_path)?;
    let (model, report) = TrainingPipeline::new(config).train(&samples)?;

    ConsoleReporter::new().print_evaluation(&report);
    save_model(&model, model_path)?;
    Ok(model)
}
