//! Declarative region table for explorer pages.
//!
//! Each region pairs a CSS selector with the rule that turns the matched
//! text into a token. Selector drift on the explorer side is handled by
//! loading a different table, not by touching the extractor.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How matched text is reduced to a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenRule {
    /// First whitespace-delimited token of the first match
    FirstToken,
    /// Last whitespace-delimited token of the first match
    LastToken,
    /// Leading digit run (with grouping commas) of every match, in document order
    DigitRuns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRule {
    pub selector: String,
    pub rule: TokenRule,
}

impl RegionRule {
    fn new(selector: &str, rule: TokenRule) -> Self {
        Self {
            selector: selector.to_string(),
            rule,
        }
    }
}

/// Selector table for the three page regions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSchema {
    pub power: RegionRule,
    pub win_count: RegionRule,
    /// Yields total, active, faults, recoveries in that order
    pub sectors: RegionRule,
}

impl Default for ExtractionSchema {
    /// Layout of the filfox address page.
    fn default() -> Self {
        Self {
            power: RegionRule::new(
                "div.flex.items-center.justify-between.w-full > p.font-medium.text-2xl",
                TokenRule::FirstToken,
            ),
            win_count: RegionRule::new(
                "div.text-sm.items-center.justify-end.flex",
                TokenRule::LastToken,
            ),
            sectors: RegionRule::new(
                "div.text-sm.mt-2.items-center.justify-between.flex > div span",
                TokenRule::DigitRuns,
            ),
        }
    }
}

impl ExtractionSchema {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse extraction schema TOML")
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read extraction schema file: {:?}", path))?;
        Self::from_toml_str(&content)
    }

    /// Regions with their stable names, in extraction order.
    pub fn regions(&self) -> [(&'static str, &RegionRule); 3] {
        [
            ("power", &self.power),
            ("win_count", &self.win_count),
            ("sectors", &self.sectors),
        ]
    }
}
