// Scrape, predict and collateral orchestration
pub mod assessment;

// Page metric extraction
pub mod extraction;

// Model training and prediction
pub mod ml;

pub mod normalizer;
