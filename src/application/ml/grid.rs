use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Random forest settings explored by the grid search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hyperparameters {
    pub n_trees: usize,
    /// `None` grows trees until leaves are pure
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
}

impl fmt::Display for Hyperparameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = self
            .max_depth
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unlimited".to_string());
        write!(
            f,
            "trees={}, depth={}, min_split={}",
            self.n_trees, depth, self.min_samples_split
        )
    }
}

/// Parameter grid for the forest search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterGrid {
    pub n_trees: Vec<usize>,
    pub max_depth: Vec<Option<u16>>,
    pub min_samples_split: Vec<usize>,
}

impl Default for ParameterGrid {
    fn default() -> Self {
        Self {
            n_trees: vec![100, 200],
            max_depth: vec![None, Some(10), Some(20)],
            min_samples_split: vec![2, 5],
        }
    }
}

/// On-disk form of the grid. TOML has no null, so depth 0 means unlimited.
#[derive(Debug, Deserialize)]
struct GridFile {
    n_trees: Vec<usize>,
    max_depth: Vec<u16>,
    min_samples_split: Vec<usize>,
}

impl ParameterGrid {
    /// Generate all parameter combinations from the grid
    pub fn combinations(&self) -> Vec<Hyperparameters> {
        let mut combinations = Vec::with_capacity(self.len());

        for &n_trees in &self.n_trees {
            for &max_depth in &self.max_depth {
                for &min_samples_split in &self.min_samples_split {
                    combinations.push(Hyperparameters {
                        n_trees,
                        max_depth,
                        min_samples_split,
                    });
                }
            }
        }

        combinations
    }

    pub fn len(&self) -> usize {
        self.n_trees.len() * self.max_depth.len() * self.min_samples_split.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: GridFile =
            toml::from_str(content).context("Failed to parse grid config TOML")?;
        Ok(Self {
            n_trees: file.n_trees,
            max_depth: file
                .max_depth
                .into_iter()
                .map(|d| if d == 0 { None } else { Some(d) })
                .collect(),
            min_samples_split: file.min_samples_split,
        })
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read grid config file: {:?}", path))?;
        Self::from_toml_str(&content)
    }
}
