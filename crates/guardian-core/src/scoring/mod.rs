//! Actor scoring.
//!
//! Contractors are looked up through a [`ScoreProvider`]; suppliers are
//! scored from their own discrepancy and status fields.

mod supplier;
mod table;

pub use supplier::{base_supplier_score, score_supplier};
pub use table::{ContractorTable, TableError};

use std::collections::{BTreeMap, HashMap};

use crate::types::ContractorScore;

/// Scores at or above this are rated excellent.
pub const EXCELLENT_SCORE: u8 = 80;

/// Scores at or above this are rated moderate; below is poor.
pub const MODERATE_SCORE: u8 = 60;

/// Source of contractor performance records, keyed by exact name.
pub trait ScoreProvider {
    fn contractor(&self, name: &str) -> Option<ContractorScore>;
}

impl ScoreProvider for HashMap<String, ContractorScore> {
    fn contractor(&self, name: &str) -> Option<ContractorScore> {
        self.get(name).cloned()
    }
}

impl ScoreProvider for BTreeMap<String, ContractorScore> {
    fn contractor(&self, name: &str) -> Option<ContractorScore> {
        self.get(name).cloned()
    }
}

impl ContractorScore {
    /// Record used for contractors absent from the provider.
    pub fn fallback(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 70,
            avg_response_time: 24,
            avg_completion_time: 5,
            repeat_occurrence: 10,
            total_assigned: 50,
            completed: 40,
        }
    }
}

/// Look up a contractor, falling back to the default record.
pub fn lookup_contractor(provider: &dyn ScoreProvider, name: &str) -> ContractorScore {
    match provider.contractor(name) {
        Some(score) => score,
        None => {
            tracing::debug!(contractor = name, "Contractor not in score table, using fallback");
            ContractorScore::fallback(name)
        }
    }
}

/// Performance band of a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Moderate,
    Poor,
}

impl ScoreBand {
    pub fn of(score: u8) -> Self {
        if score >= EXCELLENT_SCORE {
            ScoreBand::Excellent
        } else if score >= MODERATE_SCORE {
            ScoreBand::Moderate
        } else {
            ScoreBand::Poor
        }
    }
}
