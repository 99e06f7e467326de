//! Historical training data stored as CSV.
//!
//! Columns are matched by header name, so order is free and extra columns
//! are ignored. Every feature column plus the label must be present.

use crate::domain::errors::DatasetError;
use crate::domain::miner::TrainingSample;
use crate::domain::ml::feature_registry::{FEATURE_NAMES, LABEL_NAME};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

/// Loads every row of the CSV file at `path`.
pub fn load_training_samples(path: &Path) -> Result<Vec<TrainingSample>, DatasetError> {
    let file = File::open(path).map_err(|e| DatasetError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let samples = read_training_samples(BufReader::new(file), &path.display().to_string())?;
    info!("Loaded {} training samples from {:?}", samples.len(), path);
    Ok(samples)
}

/// Parses training rows from any CSV source. `source` names it in errors.
pub fn read_training_samples<R: Read>(
    reader: R,
    source: &str,
) -> Result<Vec<TrainingSample>, DatasetError> {
    let read_error = |e: csv::Error| DatasetError::Read {
        path: source.to_string(),
        reason: e.to_string(),
    };

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(read_error)?.clone();
    for column in FEATURE_NAMES.iter().chain(std::iter::once(&LABEL_NAME)) {
        if !headers.iter().any(|h| h == *column) {
            return Err(DatasetError::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    let mut samples = Vec::new();
    for (index, result) in rdr.deserialize::<TrainingSample>().enumerate() {
        let row = index + 1;
        let sample = result.map_err(|e| match e.kind() {
            csv::ErrorKind::Deserialize { err, .. } => {
                let column = err
                    .field()
                    .and_then(|i| headers.get(i as usize))
                    .unwrap_or("?")
                    .to_string();
                DatasetError::InvalidValue {
                    row,
                    column,
                    value: err.to_string(),
                }
            }
            _ => read_error(e),
        })?;
        samples.push(sample);
    }

    Ok(samples)
}
