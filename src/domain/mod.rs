// Loan collateral policy
pub mod collateral;

// Domain-specific error types
pub mod errors;

// Miner metrics and records
pub mod miner;

// Feature layout shared by training and prediction
pub mod ml;

// Port interfaces
pub mod ports;
