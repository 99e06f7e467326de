//! Miner records as they flow through the pipeline.
//!
//! A page is first reduced to a [`RawMinerRecord`] of text tokens, then
//! normalized into a [`FeatureRecord`] whose metrics are typed per field.
//! Historical rows used for training are [`TrainingSample`]s.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six operational metrics scored by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    AdjustedPower,
    WinCount,
    SectorTotal,
    SectorActive,
    SectorFaults,
    SectorRecoveries,
}

impl Metric {
    /// All metrics in model input order.
    pub const ALL: [Metric; 6] = [
        Metric::AdjustedPower,
        Metric::WinCount,
        Metric::SectorTotal,
        Metric::SectorActive,
        Metric::SectorFaults,
        Metric::SectorRecoveries,
    ];

    /// Column / key name used in datasets and JSON records.
    pub fn name(self) -> &'static str {
        match self {
            Metric::AdjustedPower => "AdjustedPower",
            Metric::WinCount => "WinCount",
            Metric::SectorTotal => "SectorTotal",
            Metric::SectorActive => "SectorActive",
            Metric::SectorFaults => "SectorFaults",
            Metric::SectorRecoveries => "SectorRecoveries",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text tokens scraped from an explorer page, keyed like the dataset columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawMinerRecord {
    pub address: String,
    pub adjusted_power: String,
    pub win_count: String,
    pub sector_total: String,
    pub sector_active: String,
    pub sector_faults: String,
    pub sector_recoveries: String,
}

impl RawMinerRecord {
    pub fn get(&self, metric: Metric) -> &str {
        match metric {
            Metric::AdjustedPower => &self.adjusted_power,
            Metric::WinCount => &self.win_count,
            Metric::SectorTotal => &self.sector_total,
            Metric::SectorActive => &self.sector_active,
            Metric::SectorFaults => &self.sector_faults,
            Metric::SectorRecoveries => &self.sector_recoveries,
        }
    }
}

/// A metric after best-effort numeric conversion.
///
/// Conversion failures are kept as `Text` so the record survives
/// normalization; consumers that need a number must narrow explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FeatureValue {
    /// Numeric view of the value, `None` for unconverted text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Integer(v) => Some(*v as f64),
            FeatureValue::Float(v) => Some(*v),
            FeatureValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Integer(v) => write!(f, "{}", v),
            FeatureValue::Float(v) => write!(f, "{}", v),
            FeatureValue::Text(v) => f.write_str(v),
        }
    }
}

/// Typed miner record fed to inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeatureRecord {
    /// Not a model input; may be absent in hand-written records.
    #[serde(default)]
    pub address: String,
    pub adjusted_power: FeatureValue,
    pub win_count: FeatureValue,
    pub sector_total: FeatureValue,
    pub sector_active: FeatureValue,
    pub sector_faults: FeatureValue,
    pub sector_recoveries: FeatureValue,
}

impl FeatureRecord {
    pub fn get(&self, metric: Metric) -> &FeatureValue {
        match metric {
            Metric::AdjustedPower => &self.adjusted_power,
            Metric::WinCount => &self.win_count,
            Metric::SectorTotal => &self.sector_total,
            Metric::SectorActive => &self.sector_active,
            Metric::SectorFaults => &self.sector_faults,
            Metric::SectorRecoveries => &self.sector_recoveries,
        }
    }

    /// Builds a record by mapping every metric through `f`.
    pub fn from_fn(address: String, mut f: impl FnMut(Metric) -> FeatureValue) -> Self {
        Self {
            address,
            adjusted_power: f(Metric::AdjustedPower),
            win_count: f(Metric::WinCount),
            sector_total: f(Metric::SectorTotal),
            sector_active: f(Metric::SectorActive),
            sector_faults: f(Metric::SectorFaults),
            sector_recoveries: f(Metric::SectorRecoveries),
        }
    }
}

/// One labeled row of the historical dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainingSample {
    pub adjusted_power: f64,
    pub win_count: f64,
    pub sector_total: f64,
    pub sector_active: f64,
    pub sector_faults: f64,
    pub sector_recoveries: f64,
    pub reputation_score: f64,
}

impl TrainingSample {
    /// Features in model input order.
    pub fn features(&self) -> Vec<f64> {
        vec![
            self.adjusted_power,
            self.win_count,
            self.sector_total,
            self.sector_active,
            self.sector_faults,
            self.sector_recoveries,
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.reputation_score.is_finite() && self.features().iter().all(|v| v.is_finite())
    }
}
