//! Core types for Guardian analyses.
//!
//! These are plain value records. The engine builds them fresh on every
//! analysis run and never mutates them afterwards; the calling layer owns
//! any collections it keeps between runs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::classify::RECURRENCE_WINDOW_DAYS;
use crate::messages::{format_count, Vars};

/// Raised when a string does not name a known enum variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Product variant an analysis belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Project {
    /// Urban road and pothole tracking
    RoadGuardian,
    /// Supply-chain phantom stock tracking
    PhantomX,
}

impl Project {
    pub fn as_str(&self) -> &'static str {
        match self {
            Project::RoadGuardian => "road_guardian",
            Project::PhantomX => "phantom_x",
        }
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a reported pothole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PotholeStatus {
    Reported,
    Assigned,
    InProgress,
    Repaired,
    Closed,
}

impl PotholeStatus {
    /// All stages in lifecycle order.
    pub const ORDER: [PotholeStatus; 5] = [
        PotholeStatus::Reported,
        PotholeStatus::Assigned,
        PotholeStatus::InProgress,
        PotholeStatus::Repaired,
        PotholeStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PotholeStatus::Reported => "reported",
            PotholeStatus::Assigned => "assigned",
            PotholeStatus::InProgress => "in_progress",
            PotholeStatus::Repaired => "repaired",
            PotholeStatus::Closed => "closed",
        }
    }

    /// Position in the lifecycle, starting at 0 for `Reported`.
    pub fn stage(&self) -> usize {
        match self {
            PotholeStatus::Reported => 0,
            PotholeStatus::Assigned => 1,
            PotholeStatus::InProgress => 2,
            PotholeStatus::Repaired => 3,
            PotholeStatus::Closed => 4,
        }
    }

    pub fn is_repaired(&self) -> bool {
        matches!(self, PotholeStatus::Repaired | PotholeStatus::Closed)
    }
}

impl FromStr for PotholeStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reported" => Ok(PotholeStatus::Reported),
            "assigned" => Ok(PotholeStatus::Assigned),
            "in_progress" => Ok(PotholeStatus::InProgress),
            "repaired" => Ok(PotholeStatus::Repaired),
            "closed" => Ok(PotholeStatus::Closed),
            other => Err(UnknownVariant::new("pothole status", other)),
        }
    }
}

/// Whether time-in-progress is within, nearing, or past its resolution window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaStatus {
    OnTrack,
    AtRisk,
    Breached,
}

impl SlaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlaStatus::OnTrack => "on_track",
            SlaStatus::AtRisk => "at_risk",
            SlaStatus::Breached => "breached",
        }
    }
}

/// Supplier tier in the supply network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SupplierTier {
    #[serde(rename = "tier_1")]
    Tier1,
    #[serde(rename = "tier_2")]
    Tier2,
    #[serde(rename = "tier_3")]
    Tier3,
}

impl SupplierTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplierTier::Tier1 => "tier_1",
            SupplierTier::Tier2 => "tier_2",
            SupplierTier::Tier3 => "tier_3",
        }
    }
}

impl FromStr for SupplierTier {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tier_1" => Ok(SupplierTier::Tier1),
            "tier_2" => Ok(SupplierTier::Tier2),
            "tier_3" => Ok(SupplierTier::Tier3),
            other => Err(UnknownVariant::new("supplier tier", other)),
        }
    }
}

/// Lifecycle of a tracked supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplierStatus {
    Active,
    AtRisk,
    Disrupted,
    Resolved,
    Blacklisted,
}

impl SupplierStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplierStatus::Active => "active",
            SupplierStatus::AtRisk => "at_risk",
            SupplierStatus::Disrupted => "disrupted",
            SupplierStatus::Resolved => "resolved",
            SupplierStatus::Blacklisted => "blacklisted",
        }
    }
}

impl FromStr for SupplierStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SupplierStatus::Active),
            "at_risk" => Ok(SupplierStatus::AtRisk),
            "disrupted" => Ok(SupplierStatus::Disrupted),
            "resolved" => Ok(SupplierStatus::Resolved),
            "blacklisted" => Ok(SupplierStatus::Blacklisted),
            other => Err(UnknownVariant::new("supplier status", other)),
        }
    }
}

/// Ordinal likelihood that a supplier fails to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
            RiskTier::Critical => "critical",
        }
    }

    pub fn is_elevated(&self) -> bool {
        matches!(self, RiskTier::High | RiskTier::Critical)
    }
}

/// Severity tag on an agent analysis.
///
/// Ordered so that `max` picks the more serious of two tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

/// Category of a generated alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Delay,
    Quality,
    Safety,
    Performance,
    PhantomStock,
    Disruption,
    Capacity,
}

/// Severity of a generated alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// The independent narrators run on every analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Ingestion,
    LifecycleTracking,
    Prediction,
    Validation,
    Scoring,
    Transparency,
    EarlyWarning,
}

impl AgentKind {
    /// Display label shown on the dashboard card.
    pub fn label(&self) -> &'static str {
        match self {
            AgentKind::Ingestion => "National Data Ingestion Agent",
            AgentKind::LifecycleTracking => "Lifecycle Tracking Agent",
            AgentKind::Prediction => "Prediction & Forecasting Agent",
            AgentKind::Validation => "Validation & Anomaly Detection Agent",
            AgentKind::Scoring => "Accountability & Scoring Agent",
            AgentKind::Transparency => "Transparency & Citizen Explanation Agent",
            AgentKind::EarlyWarning => "Alert & Early Warning Agent",
        }
    }
}

/// Administrative region of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Region {
    pub city: String,
    pub state: String,
}

impl Region {
    pub fn new(city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state: state.into(),
        }
    }

    /// Case-insensitive comparison of both city and state.
    pub fn matches(&self, other: &Region) -> bool {
        self.city.trim().eq_ignore_ascii_case(other.city.trim())
            && self.state.trim().eq_ignore_ascii_case(other.state.trim())
    }
}

/// A tracked pothole.
///
/// `days_open` and `sla_status` are derived by the intake step; `sla_status`
/// is always `classify_sla(days_open, expected_sla_days)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pothole {
    pub id: String,
    pub location: String,
    pub region: Region,
    pub date_reported: NaiveDate,
    pub contractor: String,
    pub expected_sla_days: u32,
    pub status: PotholeStatus,
    pub previous_repairs: bool,
    #[serde(default)]
    pub days_since_last_repair: Option<u32>,
    pub days_open: u32,
    pub sla_status: SlaStatus,
    #[serde(default)]
    pub monsoon_impact: bool,
}

impl Pothole {
    /// True when a prior repair failed inside the recurrence window.
    pub fn recurred_recently(&self) -> bool {
        self.previous_repairs
            && self
                .days_since_last_repair
                .is_some_and(|days| days < RECURRENCE_WINDOW_DAYS)
    }

    fn work_order_suffix(&self) -> String {
        let chars: Vec<char> = self.id.chars().collect();
        let start = chars.len().saturating_sub(4);
        chars[start..].iter().collect()
    }
}

/// A tracked supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub tier: SupplierTier,
    pub region: Region,
    pub reported_stock: u64,
    #[serde(default)]
    pub actual_stock: Option<u64>,
    pub phantom_stock_percentage: f64,
    pub production_capacity: u64,
    pub current_utilization: f64,
    pub lead_time_days: u32,
    pub status: SupplierStatus,
    pub last_audit_date: NaiveDate,
    pub disruption_risk: RiskTier,
    #[serde(default)]
    pub regional_factors: Vec<String>,
}

/// Performance record for a road contractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractorScore {
    pub name: String,
    /// Composite score, 0-100
    pub score: u8,
    /// Hours from assignment to site visit
    pub avg_response_time: u32,
    /// Days from site visit to repair
    pub avg_completion_time: u32,
    /// Percentage of repairs that failed again
    pub repeat_occurrence: u32,
    pub total_assigned: u32,
    pub completed: u32,
}

/// Performance record for a supplier.
///
/// `total_orders` and `fulfilled_orders` are drawn from the engine's RNG and
/// are only reproducible under a fixed seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierScore {
    pub name: String,
    pub score: u8,
    pub accuracy_rate: u32,
    pub delivery_on_time: u32,
    pub phantom_stock_incidents: u32,
    pub total_orders: u32,
    pub fulfilled_orders: u32,
}

/// Output of one narrator agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentAnalysis {
    pub agent: String,
    pub kind: AgentKind,
    pub icon: String,
    pub color: String,
    pub analysis: String,
    pub status: Severity,
    pub project: Project,
}

/// One lifecycle event on an entity timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub date: NaiveDate,
    pub status: String,
    pub description: String,
    pub project: Project,
}

/// An alert raised by an analysis.
///
/// `id` is derived from the alert kind and the entity or actor it concerns;
/// two runs over the same entity produce the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub contractor: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub region: Option<Region>,
    pub timestamp: DateTime<Utc>,
    pub project: Project,
}

/// Everything a road analysis returns to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadAnalysis {
    pub pothole: Pothole,
    pub agent_analyses: Vec<AgentAnalysis>,
    pub timeline: Vec<TimelineEvent>,
    pub alerts: Vec<Alert>,
    pub contractor_score: ContractorScore,
}

/// Everything a supply analysis returns to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyAnalysis {
    pub supplier: Supplier,
    pub agent_analyses: Vec<AgentAnalysis>,
    pub timeline: Vec<TimelineEvent>,
    pub alerts: Vec<Alert>,
    pub supplier_score: SupplierScore,
}

/// Capability descriptor for an entity family the agents can narrate.
///
/// Each product variant implements this once; the agents stay generic and
/// pick their project-specific wording from the message catalog.
pub trait Subject {
    /// Score record for the actor responsible for this entity.
    type Score: ActorScore;

    /// Project tag stamped on everything produced for this entity.
    const PROJECT: Project;

    fn id(&self) -> &str;

    fn region(&self) -> &Region;

    /// Name of the responsible actor (contractor or supplier).
    fn actor(&self) -> &str;

    /// Same real-world entity filed under a different id.
    fn is_duplicate_of(&self, other: &Self) -> bool;

    /// Whether a seasonal factor applies to this entity.
    fn seasonal_impact(&self) -> bool {
        false
    }

    /// Template variables describing this entity.
    fn vars(&self) -> Vars;
}

/// A score record the scoring agents can band.
pub trait ActorScore {
    fn name(&self) -> &str;

    fn score(&self) -> u8;

    fn vars(&self) -> Vars;
}

impl Subject for Pothole {
    type Score = ContractorScore;

    const PROJECT: Project = Project::RoadGuardian;

    fn id(&self) -> &str {
        &self.id
    }

    fn region(&self) -> &Region {
        &self.region
    }

    fn actor(&self) -> &str {
        &self.contractor
    }

    fn is_duplicate_of(&self, other: &Self) -> bool {
        self.id != other.id
            && self.location.trim().to_lowercase() == other.location.trim().to_lowercase()
            && self.region.matches(&other.region)
    }

    fn seasonal_impact(&self) -> bool {
        self.monsoon_impact
    }

    fn vars(&self) -> Vars {
        let since_repair = self
            .days_since_last_repair
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        Vars::new()
            .with("id", &self.id)
            .with("location", &self.location)
            .with("city", &self.region.city)
            .with("state", &self.region.state)
            .with("actor", &self.contractor)
            .with("contractor", &self.contractor)
            .with("expected_sla", self.expected_sla_days)
            .with("days_open", self.days_open)
            .with(
                "sla_remaining",
                i64::from(self.expected_sla_days) - i64::from(self.days_open),
            )
            .with("days_since_last_repair", since_repair)
            .with("work_order", self.work_order_suffix())
    }
}

impl Subject for Supplier {
    type Score = SupplierScore;

    const PROJECT: Project = Project::PhantomX;

    fn id(&self) -> &str {
        &self.id
    }

    fn region(&self) -> &Region {
        &self.region
    }

    fn actor(&self) -> &str {
        &self.name
    }

    fn is_duplicate_of(&self, other: &Self) -> bool {
        self.id != other.id
            && self.name.trim().to_lowercase() == other.name.trim().to_lowercase()
            && self.region.matches(&other.region)
    }

    fn vars(&self) -> Vars {
        let tier_label = self.tier.as_str().replace('_', " ");
        let status_label = self.status.as_str().replace('_', " ");
        let actual = self
            .actual_stock
            .map(format_count)
            .unwrap_or_else(|| "unknown".to_string());

        Vars::new()
            .with("id", &self.id)
            .with("name", &self.name)
            .with("actor", &self.name)
            .with("city", &self.region.city)
            .with("state", &self.region.state)
            .with("tier", tier_label.to_uppercase())
            .with("tier_lower", tier_label)
            .with("status", status_label.to_uppercase())
            .with("status_lower", status_label)
            .with("utilization", self.current_utilization)
            .with("lead_time", self.lead_time_days)
            .with("phantom", format!("{:.1}", self.phantom_stock_percentage))
            .with(
                "stock_accuracy",
                format!("{:.1}", 100.0 - self.phantom_stock_percentage),
            )
            .with("reported_stock", format_count(self.reported_stock))
            .with("actual_stock", actual)
            .with("regional_factors", self.regional_factors.join(", "))
    }
}

impl ActorScore for ContractorScore {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self) -> u8 {
        self.score
    }

    fn vars(&self) -> Vars {
        Vars::new()
            .with("score", self.score)
            .with("avg_response_time", self.avg_response_time)
            .with("avg_completion_time", self.avg_completion_time)
            .with("repeat_occurrence", self.repeat_occurrence)
    }
}

impl ActorScore for SupplierScore {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self) -> u8 {
        self.score
    }

    fn vars(&self) -> Vars {
        Vars::new()
            .with("score", self.score)
            .with("accuracy_rate", self.accuracy_rate)
            .with("delivery_on_time", self.delivery_on_time)
            .with("phantom_stock_incidents", self.phantom_stock_incidents)
    }
}
