//! Threshold classifiers.
//!
//! Every function here is pure and total. Degenerate numeric input (zero
//! denominators, NaN) yields the worst-case class instead of an error.

use crate::types::{RiskTier, SlaStatus, Supplier, SupplierStatus, SupplierTier};

/// Ratio of days open to expected days below which an issue is on track.
pub const SLA_AT_RISK_RATIO: f64 = 0.7;

/// Ratio at or above which the SLA is breached.
pub const SLA_BREACH_RATIO: f64 = 1.0;

/// A prior repair that failed within this many days is a recurrence.
pub const RECURRENCE_WINDOW_DAYS: u32 = 90;

/// Phantom stock percentage above which a supplier is flagged critical.
pub const PHANTOM_CRITICAL_PERCENT: f64 = 20.0;

/// Phantom stock percentage above which a discrepancy needs an audit.
pub const PHANTOM_DISCREPANCY_PERCENT: f64 = 10.0;

/// Utilization percentage above which a supplier is capacity constrained.
pub const CAPACITY_LIMIT_PERCENT: f64 = 95.0;

/// Risk score at or above which a supplier is `Critical`.
pub const CRITICAL_RISK_SCORE: u32 = 7;

/// Risk score at or above which a supplier is `High`.
pub const HIGH_RISK_SCORE: u32 = 5;

/// Risk score at or above which a supplier is `Medium`.
pub const MEDIUM_RISK_SCORE: u32 = 3;

/// Classify an SLA from days open and the expected resolution window.
///
/// A non-positive window is treated as already breached.
pub fn classify_sla(days_open: i64, expected_days: i64) -> SlaStatus {
    if expected_days <= 0 {
        return SlaStatus::Breached;
    }

    let ratio = days_open as f64 / expected_days as f64;
    if ratio < SLA_AT_RISK_RATIO {
        SlaStatus::OnTrack
    } else if ratio < SLA_BREACH_RATIO {
        SlaStatus::AtRisk
    } else {
        SlaStatus::Breached
    }
}

/// Gap between reported and actual stock as a percentage of reported stock.
///
/// Zero when the actual count is unknown, at least the reported count, or
/// when nothing was reported.
pub fn calculate_phantom_stock(reported: u64, actual: Option<u64>) -> f64 {
    match actual {
        Some(actual) if reported > 0 && actual < reported => {
            (reported - actual) as f64 / reported as f64 * 100.0
        }
        _ => 0.0,
    }
}

/// The five inputs of the disruption-risk score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskFactors {
    pub phantom_stock_percentage: f64,
    pub utilization: f64,
    pub lead_time_days: u32,
    pub status: SupplierStatus,
    pub tier: SupplierTier,
}

impl From<&Supplier> for RiskFactors {
    fn from(supplier: &Supplier) -> Self {
        Self {
            phantom_stock_percentage: supplier.phantom_stock_percentage,
            utilization: supplier.current_utilization,
            lead_time_days: supplier.lead_time_days,
            status: supplier.status,
            tier: supplier.tier,
        }
    }
}

/// Additive risk score: each band contributes independently.
///
/// | Factor | Bands |
/// |---|---|
/// | phantom % | >30: 3, >15: 2, >5: 1 |
/// | utilization % | >95: 2, >85: 1 |
/// | lead time days | >14: 2, >7: 1 |
/// | status | disrupted: 3, at_risk: 2 |
/// | tier | tier_1: 1 |
///
/// NaN percentages score as the highest band.
pub fn disruption_risk_score(factors: &RiskFactors) -> u32 {
    let phantom = factors.phantom_stock_percentage;
    let phantom_score = if phantom.is_nan() || phantom > 30.0 {
        3
    } else if phantom > 15.0 {
        2
    } else if phantom > 5.0 {
        1
    } else {
        0
    };

    let utilization = factors.utilization;
    let utilization_score = if utilization.is_nan() || utilization > 95.0 {
        2
    } else if utilization > 85.0 {
        1
    } else {
        0
    };

    let lead_time_score = match factors.lead_time_days {
        d if d > 14 => 2,
        d if d > 7 => 1,
        _ => 0,
    };

    let status_score = match factors.status {
        SupplierStatus::Disrupted => 3,
        SupplierStatus::AtRisk => 2,
        _ => 0,
    };

    let tier_score = match factors.tier {
        SupplierTier::Tier1 => 1,
        _ => 0,
    };

    phantom_score + utilization_score + lead_time_score + status_score + tier_score
}

/// Map a risk score onto its tier.
pub fn risk_tier(score: u32) -> RiskTier {
    if score >= CRITICAL_RISK_SCORE {
        RiskTier::Critical
    } else if score >= HIGH_RISK_SCORE {
        RiskTier::High
    } else if score >= MEDIUM_RISK_SCORE {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

/// Classify a supplier's disruption risk.
pub fn classify_disruption_risk(factors: &RiskFactors) -> RiskTier {
    risk_tier(disruption_risk_score(factors))
}
