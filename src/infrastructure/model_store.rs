use crate::application::ml::ReputationModel;
use crate::domain::errors::ModelStoreError;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes `model` as JSON, creating parent directories as needed.
pub fn save_model(model: &ReputationModel, path: &Path) -> Result<(), ModelStoreError> {
    let io_error = |e: std::io::Error| ModelStoreError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }

    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
    serde_json::to_writer(&mut writer, model).map_err(|e| ModelStoreError::Format {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    writer.flush().map_err(io_error)?;

    info!("Saved model to {:?}", path);
    Ok(())
}

/// Restores a model written by [`save_model`].
pub fn load_model(path: &Path) -> Result<ReputationModel, ModelStoreError> {
    let file = File::open(path).map_err(|e| ModelStoreError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let model: ReputationModel =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| ModelStoreError::Format {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    info!(
        "Successfully loaded ML model from {:?} ({})",
        path,
        model.hyperparameters()
    );
    Ok(model)
}
