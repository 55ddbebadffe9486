//! Dashboard aggregates over caller-owned lists.

use serde::Serialize;

use crate::classify::PHANTOM_DISCREPANCY_PERCENT;
use crate::types::{Pothole, SlaStatus, Supplier};

/// Summary counts for a list of potholes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoadMetrics {
    pub total: usize,
    /// Repaired or closed
    pub repaired: usize,
    pub breached: usize,
    /// Mean days open, rounded to the nearest day
    pub average_days_open: u32,
}

impl RoadMetrics {
    pub fn from_potholes(potholes: &[Pothole]) -> Self {
        if potholes.is_empty() {
            return Self::default();
        }

        let total = potholes.len();
        let days: u64 = potholes.iter().map(|p| u64::from(p.days_open)).sum();
        let average = (days as f64 / total as f64).round();

        Self {
            total,
            repaired: potholes.iter().filter(|p| p.status.is_repaired()).count(),
            breached: potholes
                .iter()
                .filter(|p| p.sla_status == SlaStatus::Breached)
                .count(),
            average_days_open: average as u32,
        }
    }
}

/// Summary counts for a list of suppliers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SupplyMetrics {
    pub total: usize,
    /// Phantom stock above the discrepancy threshold
    pub phantom_flagged: usize,
    /// High or critical disruption risk
    pub high_risk: usize,
    pub average_phantom_percentage: f64,
}

impl SupplyMetrics {
    pub fn from_suppliers(suppliers: &[Supplier]) -> Self {
        if suppliers.is_empty() {
            return Self::default();
        }

        let total = suppliers.len();
        let phantom: f64 = suppliers.iter().map(|s| s.phantom_stock_percentage).sum();

        Self {
            total,
            phantom_flagged: suppliers
                .iter()
                .filter(|s| s.phantom_stock_percentage > PHANTOM_DISCREPANCY_PERCENT)
                .count(),
            high_risk: suppliers
                .iter()
                .filter(|s| s.disruption_risk.is_elevated())
                .count(),
            average_phantom_percentage: phantom / total as f64,
        }
    }
}
