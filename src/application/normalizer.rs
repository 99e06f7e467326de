//! Best-effort typing of scraped metrics.
//!
//! Normalization never fails. A field that does not parse stays as text and
//! surfaces later as a `FeatureTypeError` when a number is actually needed.

use crate::domain::miner::{FeatureRecord, FeatureValue, RawMinerRecord};

/// Converts one scraped token.
///
/// Grouping commas are ignored. Integral values become `Integer`, other
/// finite numbers `Float`, anything else (including "NaN" and "inf") is kept
/// verbatim as `Text`.
pub fn normalize_token(raw: &str) -> FeatureValue {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();

    match cleaned.parse::<f64>() {
        Ok(value) if is_integral(value) => FeatureValue::Integer(value as i64),
        Ok(value) if value.is_finite() => FeatureValue::Float(value),
        _ => FeatureValue::Text(raw.to_string()),
    }
}

fn is_integral(value: f64) -> bool {
    value.is_finite()
        && value.trunc() == value
        && value >= i64::MIN as f64
        && value < i64::MAX as f64
}

/// Types every metric of a scraped record. `Address` is carried through as is.
pub fn normalize(raw: &RawMinerRecord) -> FeatureRecord {
    FeatureRecord::from_fn(raw.address.clone(), |metric| normalize_token(raw.get(metric)))
}

/// Re-applies normalization to an already typed record.
///
/// Numbers pass through untouched; text fields get another parse attempt.
pub fn normalize_features(record: FeatureRecord) -> FeatureRecord {
    let renormalize = |value: FeatureValue| match value {
        FeatureValue::Text(raw) => normalize_token(&raw),
        FeatureValue::Float(v) if is_integral(v) => FeatureValue::Integer(v as i64),
        FeatureValue::Float(v) if !v.is_finite() => FeatureValue::Text(v.to_string()),
        other => other,
    };

    FeatureRecord {
        address: record.address,
        adjusted_power: renormalize(record.adjusted_power),
        win_count: renormalize(record.win_count),
        sector_total: renormalize(record.sector_total),
        sector_active: renormalize(record.sector_active),
        sector_faults: renormalize(record.sector_faults),
        sector_recoveries: renormalize(record.sector_recoveries),
    }
}
