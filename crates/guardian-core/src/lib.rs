//! # guardian-core
//!
//! Deterministic classification, scoring and narration engine for civic
//! infrastructure (Road Guardian) and supply-chain (PhantomX) monitoring.
//!
//! Each analysis answers:
//! - How far along is this entity, and is it late or at risk?
//! - How well is the responsible contractor or supplier performing?
//! - What should be escalated, and to whom?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same form, clock and seed always produce the same bundle
//! 2. **Total classifiers**: Degenerate numbers classify as worst case, never panic
//! 3. **Independent agents**: No agent reads another's output
//! 4. **Stateless**: The caller owns every entity list
//!
//! ## Example
//!
//! ```rust,ignore
//! use guardian_core::{Engine, RoadForm};
//!
//! let form = RoadForm::from_yaml(&std::fs::read_to_string("report.yaml")?)?;
//! let mut engine = Engine::builder().seed(42).build();
//! let result = engine.analyze_road(&form, &potholes)?;
//!
//! for alert in &result.alerts {
//!     println!("{}: {}", alert.title, alert.description);
//! }
//! ```

pub mod agents;
pub mod alerts;
pub mod classify;
pub mod clock;
pub mod config;
pub mod engine;
pub mod intake;
pub mod messages;
pub mod metrics;
pub mod registry;
pub mod scoring;
pub mod timeline;
pub mod types;

// Re-export main types at crate root
pub use agents::{Agent, AgentContext, Narrative};
pub use alerts::AlertBoard;
pub use classify::{calculate_phantom_stock, classify_disruption_risk, classify_sla, RiskFactors};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use engine::{Engine, EngineBuilder};
pub use intake::{RoadForm, SupplyForm, ValidationError};
pub use messages::{CatalogError, MessageCatalog};
pub use metrics::{RoadMetrics, SupplyMetrics};
pub use scoring::{ContractorTable, ScoreProvider, TableError};
pub use types::{
    AgentAnalysis, AgentKind, Alert, AlertKind, AlertSeverity, ContractorScore, Pothole,
    PotholeStatus, Project, Region, RiskTier, RoadAnalysis, Severity, SlaStatus, Supplier,
    SupplierScore, SupplierStatus, SupplierTier, SupplyAnalysis, TimelineEvent,
};

use thiserror::Error;

/// Errors that can occur during an analysis or while loading reference data
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Form failed schema validation: {}", join_errors(.0))]
    Schema(Vec<ValidationError>),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid reference data: {0}")]
    ReferenceData(String),
}

impl From<TableError> for EngineError {
    fn from(err: TableError) -> Self {
        EngineError::ReferenceData(err.to_string())
    }
}

impl From<CatalogError> for EngineError {
    fn from(err: CatalogError) -> Self {
        EngineError::ReferenceData(err.to_string())
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Analyze a pothole report with a default engine.
///
/// Uses the system clock and an entropy-seeded RNG; build an [`Engine`]
/// for reproducible results.
pub fn analyze_road(form: &RoadForm, existing: &[Pothole]) -> Result<RoadAnalysis, EngineError> {
    Engine::new().analyze_road(form, existing)
}

/// Analyze a supplier record with a default engine.
pub fn analyze_supply(
    form: &SupplyForm,
    existing: &[Supplier],
) -> Result<SupplyAnalysis, EngineError> {
    Engine::new().analyze_supply(form, existing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_road_analysis() {
        let form_yaml = r#"
pothole_id: "new"
location: "Ring Road, Lajpat Nagar"
city: "Delhi"
state: "Delhi"
date_reported: "2024-01-15"
contractor: "PWD Road Division"
expected_sla_days: 5
status: "in_progress"
previous_repairs: true
days_since_last_repair: 45
monsoon_impact: true
"#;

        let form = RoadForm::from_yaml(form_yaml).unwrap();
        let result = analyze_road(&form, &[]).unwrap();

        assert!(result.pothole.id.starts_with("PH-DE-DEL-"));
        assert_eq!(result.pothole.sla_status, SlaStatus::Breached);
        assert_eq!(result.agent_analyses.len(), 6);
        assert_eq!(result.timeline.len(), 3);

        let kinds: Vec<AlertKind> = result.alerts.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AlertKind::Delay, AlertKind::Quality]);
        assert!(result
            .alerts
            .iter()
            .all(|a| a.project == Project::RoadGuardian));
    }

    #[test]
    fn test_basic_supply_analysis() {
        let form_json = r#"{
            "supplier_id": "SUP-MA-0001",
            "supplier_name": "Bharat Forge",
            "tier": "tier_3",
            "city": "Pune",
            "state": "Maharashtra",
            "reported_stock": 4000,
            "actual_stock": 4000,
            "production_capacity": 2000,
            "current_utilization": 60,
            "lead_time_days": 3,
            "status": "active",
            "last_audit_date": "2026-08-01"
        }"#;

        let form = SupplyForm::from_json(form_json).unwrap();
        let result = analyze_supply(&form, &[]).unwrap();

        assert_eq!(result.supplier.id, "SUP-MA-0001");
        assert_eq!(result.supplier.disruption_risk, RiskTier::Low);
        assert_eq!(result.supplier_score.score, 80);
        assert!(result.alerts.is_empty());
        assert_eq!(result.timeline.len(), 1);
    }

    #[test]
    fn test_schema_error_lists_every_field() {
        let err = EngineError::Schema(vec![
            ValidationError::new("city", "is required"),
            ValidationError::new("status", "is not one of the allowed values"),
        ]);

        assert_eq!(
            err.to_string(),
            "Form failed schema validation: Invalid field 'city': is required; \
             Invalid field 'status': is not one of the allowed values"
        );
    }

    #[test]
    fn test_table_error_becomes_reference_data() {
        let err: EngineError = TableError::ValidationError("Duplicate contractor: X".into()).into();
        assert!(matches!(err, EngineError::ReferenceData(ref msg) if msg.contains("Duplicate")));
    }
}
