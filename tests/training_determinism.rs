use minerscore::application::ml::{ParameterGrid, TrainingConfig, TrainingPipeline};
use minerscore::domain::errors::{DatasetError, PredictionError, TrainingError};
use minerscore::domain::miner::{FeatureRecord, FeatureValue, TrainingSample};
use minerscore::domain::ports::ReputationPredictor;
use minerscore::infrastructure::dataset::load_training_samples;
use minerscore::infrastructure::model_store::{load_model, save_model};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;

/// Synthetic miners whose score rises with active share and falls with faults.
fn synthetic_samples(n: usize, seed: u64) -> Vec<TrainingSample> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let sector_total = rng.random_range(1_000.0..20_000.0_f64).round();
            let sector_active = (sector_total * rng.random_range(0.8..1.0)).round();
            let sector_faults = (sector_total - sector_active).max(0.0);
            let sector_recoveries = (sector_faults * rng.random_range(0.0..0.5)).round();
            let win_count = rng.random_range(0.0..50.0_f64).round();
            let adjusted_power = (sector_total * 0.032).round();
            let reputation_score = 1000.0 * sector_active / sector_total - sector_faults * 0.01
                + win_count * 2.0;

            TrainingSample {
                adjusted_power,
                win_count,
                sector_total,
                sector_active,
                sector_faults,
                sector_recoveries,
                reputation_score,
            }
        })
        .collect()
}

fn small_grid_config(seed: u64) -> TrainingConfig {
    TrainingConfig {
        seed,
        grid: ParameterGrid {
            n_trees: vec![10, 20],
            max_depth: vec![None, Some(6)],
            min_samples_split: vec![2],
        },
        ..TrainingConfig::default()
    }
}

fn record(values: [FeatureValue; 6]) -> FeatureRecord {
    let [p, w, t, a, f, r] = values;
    FeatureRecord {
        address: "f01234".to_string(),
        adjusted_power: p,
        win_count: w,
        sector_total: t,
        sector_active: a,
        sector_faults: f,
        sector_recoveries: r,
    }
}

#[test]
fn test_same_seed_same_result() {
    let samples = synthetic_samples(60, 7);

    let (model_a, report_a) = TrainingPipeline::new(small_grid_config(42))
        .train(&samples)
        .unwrap();
    let (model_b, report_b) = TrainingPipeline::new(small_grid_config(42))
        .train(&samples)
        .unwrap();

    assert_eq!(report_a.best, report_b.best);
    assert_eq!(report_a.test_mse, report_b.test_mse);
    assert_eq!(report_a.test_r2, report_b.test_r2);
    assert_eq!(report_a.candidates.len(), 4);
    assert_eq!(model_a.hyperparameters(), model_b.hyperparameters());

    let probe = record([
        FeatureValue::Integer(320),
        FeatureValue::Integer(12),
        FeatureValue::Integer(10_000),
        FeatureValue::Integer(9_500),
        FeatureValue::Integer(500),
        FeatureValue::Integer(100),
    ]);
    assert_eq!(
        model_a.predict(&probe).unwrap(),
        model_b.predict(&probe).unwrap()
    );
}

#[test]
fn test_report_sizes_follow_fraction() {
    let samples = synthetic_samples(50, 3);
    let (_, report) = TrainingPipeline::new(small_grid_config(1))
        .train(&samples)
        .unwrap();

    assert_eq!(report.test_size, 10);
    assert_eq!(report.train_size, 40);
    assert!(report.test_mse.is_finite());
}

#[test]
fn test_text_feature_rejected_at_prediction() {
    let (model, _) = TrainingPipeline::new(small_grid_config(42))
        .train(&synthetic_samples(40, 11))
        .unwrap();

    let probe = record([
        FeatureValue::Integer(320),
        FeatureValue::Text("n/a".to_string()),
        FeatureValue::Integer(10_000),
        FeatureValue::Integer(9_500),
        FeatureValue::Integer(500),
        FeatureValue::Float(100.5),
    ]);

    match model.predict(&probe) {
        Err(PredictionError::Type(err)) => assert_eq!(err.feature, "WinCount"),
        other => panic!("expected a feature type error, got {:?}", other),
    }
}

#[test]
fn test_empty_dataset_rejected() {
    let err = TrainingPipeline::new(small_grid_config(42))
        .train(&[])
        .err()
        .unwrap();
    assert!(matches!(err, TrainingError::Dataset(DatasetError::Empty)));
}

#[test]
fn test_csv_to_saved_model() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("generated_data.csv");
    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(
        file,
        "AdjustedPower,WinCount,SectorTotal,SectorActive,SectorFaults,SectorRecoveries,ReputationScore"
    )
    .unwrap();
    for s in synthetic_samples(30, 5) {
        writeln!(
            file,
            "{},{},{},{},{},{},{}",
            s.adjusted_power,
            s.win_count,
            s.sector_total,
            s.sector_active,
            s.sector_faults,
            s.sector_recoveries,
            s.reputation_score
        )
        .unwrap();
    }
    drop(file);

    let samples = load_training_samples(&csv_path).unwrap();
    assert_eq!(samples.len(), 30);

    let (model, _) = TrainingPipeline::new(small_grid_config(42))
        .train(&samples)
        .unwrap();
    let model_path = dir.path().join("model").join("reputation_model.json");
    save_model(&model, &model_path).unwrap();

    let restored = load_model(&model_path).unwrap();
    assert_eq!(restored.metadata().training_samples, model.metadata().training_samples);
    assert_eq!(restored.metadata().seed, 42);
}
