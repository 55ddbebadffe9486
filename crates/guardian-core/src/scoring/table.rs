//! Contractor score table.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::ScoreProvider;
use crate::types::ContractorScore;

/// Errors that can occur when loading a contractor table.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to read contractor table: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Contractor table validation failed: {0}")]
    ValidationError(String),
}

/// Contractor scores keyed by exact contractor name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractorTable {
    entries: BTreeMap<String, ContractorScore>,
}

impl ContractorTable {
    /// Build a table from records, rejecting malformed entries.
    pub fn from_scores(scores: Vec<ContractorScore>) -> Result<Self, TableError> {
        validate(&scores)?;

        let entries = scores
            .into_iter()
            .map(|score| (score.name.clone(), score))
            .collect();

        Ok(Self { entries })
    }

    /// Parse a YAML list of contractor records.
    pub fn from_yaml(yaml: &str) -> Result<Self, TableError> {
        let scores: Vec<ContractorScore> = serde_yaml::from_str(yaml)?;
        Self::from_scores(scores)
    }

    /// Parse a JSON array of contractor records.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let scores: Vec<ContractorScore> = serde_json::from_str(json)?;
        Self::from_scores(scores)
    }

    /// Load a YAML contractor table from disk.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// The reference contractors shipped with the engine.
    pub fn seeded() -> Self {
        let entries = SEEDED
            .iter()
            .map(|&(name, score, response, completion, repeat, assigned, completed)| {
                (
                    name.to_string(),
                    ContractorScore {
                        name: name.to_string(),
                        score,
                        avg_response_time: response,
                        avg_completion_time: completion,
                        repeat_occurrence: repeat,
                        total_assigned: assigned,
                        completed,
                    },
                )
            })
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ContractorScore> {
        self.entries.values()
    }
}

impl Default for ContractorTable {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ScoreProvider for ContractorTable {
    fn contractor(&self, name: &str) -> Option<ContractorScore> {
        self.entries.get(name).cloned()
    }
}

fn validate(scores: &[ContractorScore]) -> Result<(), TableError> {
    let mut seen = HashSet::new();

    for score in scores {
        if score.name.trim().is_empty() {
            return Err(TableError::ValidationError(
                "Contractor name must not be empty".to_string(),
            ));
        }

        if score.score > 100 {
            return Err(TableError::ValidationError(format!(
                "Score for {} is {}, expected 0-100",
                score.name, score.score
            )));
        }

        if score.completed > score.total_assigned {
            return Err(TableError::ValidationError(format!(
                "{} completed {} of only {} assigned repairs",
                score.name, score.completed, score.total_assigned
            )));
        }

        if !seen.insert(score.name.as_str()) {
            return Err(TableError::ValidationError(format!(
                "Duplicate contractor: {}",
                score.name
            )));
        }
    }

    Ok(())
}

/// name, score, response hours, completion days, repeat %, assigned, completed
const SEEDED: &[(&str, u8, u32, u32, u32, u32, u32)] = &[
    ("Larsen & Toubro Infrastructure", 92, 8, 3, 2, 450, 442),
    ("NHAI Road Works Division", 85, 16, 4, 6, 380, 355),
    ("Ashoka Buildcon Ltd.", 78, 24, 5, 9, 220, 198),
    ("IRB Infrastructure", 88, 12, 4, 5, 310, 295),
    ("Dilip Buildcon Ltd.", 72, 36, 6, 12, 180, 152),
    ("Gayatri Projects Ltd.", 65, 48, 7, 18, 140, 108),
    ("Municipal Corporation Works", 58, 72, 9, 25, 520, 385),
    ("PWD Road Division", 62, 60, 8, 20, 680, 510),
];
