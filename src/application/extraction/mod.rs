//! Metric extraction from explorer pages.

pub mod extractor;
pub mod schema;

pub use extractor::MetricExtractor;
pub use schema::{ExtractionSchema, RegionRule, TokenRule};
