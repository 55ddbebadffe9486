//! Analysis engine.
//!
//! # Architecture
//! - Intake: validate the form and normalize it into an entity
//! - Scoring: look up or compute the responsible actor's score
//! - Fan-out: every agent in the project's roster narrates independently
//! - Projections: timeline and alerts are rebuilt from the entity
//!
//! The engine owns no entity lists. Each call reads the caller's existing
//! entities for duplicate detection and returns a fresh bundle.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::agents::{run_roster, road_roster, supply_roster, AgentContext, Roster};
use crate::alerts::{road_alerts, supply_alerts};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::intake::{normalize_road, normalize_supply, RoadForm, SupplyForm};
use crate::messages::MessageCatalog;
use crate::scoring::{lookup_contractor, score_supplier, ContractorTable, ScoreProvider};
use crate::timeline::{road_timeline, supply_timeline};
use crate::types::{Pothole, RoadAnalysis, Supplier, SupplyAnalysis};
use crate::EngineError;

/// Runs road and supply analyses.
///
/// Identifier serials and supplier order counts are drawn from the engine's
/// RNG, so two engines built with the same seed and fed the same forms
/// produce identical results.
pub struct Engine {
    /// Contractor score source
    scores: Box<dyn ScoreProvider>,

    /// Source of "now" for days open, status dates and alert timestamps
    clock: Box<dyn Clock>,

    rng: StdRng,

    catalog: MessageCatalog,

    road_roster: Roster<Pothole>,

    supply_roster: Roster<Supplier>,
}

impl Engine {
    /// Engine with the seeded contractor table, built-in messages, the
    /// system clock and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Engine configured from reference data, using the system clock.
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        let mut builder = Self::builder()
            .scores(config.contractor_table()?)
            .catalog(config.catalog()?);

        if let Some(seed) = config.seed {
            builder = builder.seed(seed);
        }

        Ok(builder.build())
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Analyze a pothole report against the potholes already on record.
    pub fn analyze_road(
        &mut self,
        form: &RoadForm,
        existing: &[Pothole],
    ) -> Result<RoadAnalysis, EngineError> {
        let now = self.clock.now();
        let pothole = normalize_road(form, now.date_naive(), &mut self.rng)?;
        let score = lookup_contractor(self.scores.as_ref(), &pothole.contractor);

        let ctx = AgentContext::new(&pothole, &score, existing);
        let agent_analyses = run_roster(&self.road_roster, &ctx, &self.catalog);
        let timeline = road_timeline(&pothole, &self.catalog);
        let alerts = road_alerts(&pothole, &score, now, &self.catalog);

        tracing::info!(
            id = %pothole.id,
            sla = pothole.sla_status.as_str(),
            contractor = %score.name,
            score = score.score,
            alerts = alerts.len(),
            "Road analysis complete"
        );

        Ok(RoadAnalysis {
            pothole,
            agent_analyses,
            timeline,
            alerts,
            contractor_score: score,
        })
    }

    /// Analyze a supplier record against the suppliers already on record.
    pub fn analyze_supply(
        &mut self,
        form: &SupplyForm,
        existing: &[Supplier],
    ) -> Result<SupplyAnalysis, EngineError> {
        let now = self.clock.now();
        let supplier = normalize_supply(form, &mut self.rng)?;
        let score = score_supplier(&supplier, &mut self.rng);

        let ctx = AgentContext::new(&supplier, &score, existing);
        let agent_analyses = run_roster(&self.supply_roster, &ctx, &self.catalog);
        let timeline = supply_timeline(&supplier, now.date_naive(), &self.catalog);
        let alerts = supply_alerts(&supplier, &score, now, &self.catalog);

        tracing::info!(
            id = %supplier.id,
            risk = supplier.disruption_risk.as_str(),
            phantom = supplier.phantom_stock_percentage,
            score = score.score,
            alerts = alerts.len(),
            "Supply analysis complete"
        );

        Ok(SupplyAnalysis {
            supplier,
            agent_analyses,
            timeline,
            alerts,
            supplier_score: score,
        })
    }

    /// Schema-check an untyped road payload, then analyze it.
    pub fn analyze_road_value(
        &mut self,
        value: serde_json::Value,
        existing: &[Pothole],
    ) -> Result<RoadAnalysis, EngineError> {
        let form = RoadForm::from_value(value)?;
        self.analyze_road(&form, existing)
    }

    /// Schema-check an untyped supply payload, then analyze it.
    pub fn analyze_supply_value(
        &mut self,
        value: serde_json::Value,
        existing: &[Supplier],
    ) -> Result<SupplyAnalysis, EngineError> {
        let form = SupplyForm::from_value(value)?;
        self.analyze_supply(&form, existing)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Engine`].
pub struct EngineBuilder {
    scores: Box<dyn ScoreProvider>,
    clock: Box<dyn Clock>,
    seed: Option<u64>,
    catalog: MessageCatalog,
}

impl EngineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            scores: Box::new(ContractorTable::seeded()),
            clock: Box::new(SystemClock),
            seed: None,
            catalog: MessageCatalog::new(),
        }
    }

    /// Set the contractor score source.
    pub fn scores(mut self, scores: impl ScoreProvider + 'static) -> Self {
        self.scores = Box::new(scores);
        self
    }

    /// Set the clock.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Seed the RNG for reproducible ids and order counts.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the message catalog.
    pub fn catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Build the engine.
    pub fn build(self) -> Engine {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Engine {
            scores: self.scores,
            clock: self.clock,
            rng,
            catalog: self.catalog,
            road_roster: road_roster(),
            supply_roster: supply_roster(),
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::types::{
        AgentKind, AlertKind, AlertSeverity, ContractorScore, Project, RiskTier, Severity,
        SlaStatus,
    };
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn clock() -> FixedClock {
        FixedClock::on(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    fn engine(seed: u64) -> Engine {
        Engine::builder().clock(clock()).seed(seed).build()
    }

    fn road_form() -> RoadForm {
        RoadForm {
            pothole_id: "PH-MA-MUM-0042".to_string(),
            location: "Linking Road Junction".to_string(),
            city: "Mumbai".to_string(),
            state: "Maharashtra".to_string(),
            date_reported: "2026-10-04".to_string(),
            contractor: "IRB Infrastructure".to_string(),
            expected_sla_days: 7,
            status: "assigned".to_string(),
            previous_repairs: false,
            days_since_last_repair: None,
            monsoon_impact: false,
        }
    }

    fn supply_form() -> SupplyForm {
        SupplyForm {
            supplier_id: "new".to_string(),
            supplier_name: "Sundram Fasteners".to_string(),
            tier: "tier_1".to_string(),
            city: "Chennai".to_string(),
            state: "Tamil Nadu".to_string(),
            reported_stock: 10_000,
            actual_stock: Some(6_500),
            production_capacity: 8_000,
            current_utilization: 96.0,
            lead_time_days: 15,
            status: "disrupted".to_string(),
            last_audit_date: "2026-09-30".to_string(),
            regional_factors: vec!["monsoon".to_string()],
        }
    }

    #[test]
    fn test_breached_road_scenario() {
        let result = engine(1).analyze_road(&road_form(), &[]).unwrap();

        assert_eq!(result.pothole.days_open, 12);
        assert_eq!(result.pothole.sla_status, SlaStatus::Breached);
        assert_eq!(result.contractor_score.score, 88);

        assert_eq!(result.alerts.len(), 1);
        assert_eq!(result.alerts[0].kind, AlertKind::Delay);
        assert_eq!(result.alerts[0].severity, AlertSeverity::Critical);
        assert_eq!(result.alerts[0].timestamp, clock().0);

        let kinds: Vec<AgentKind> = result.agent_analyses.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AgentKind::Ingestion,
                AgentKind::LifecycleTracking,
                AgentKind::Scoring,
                AgentKind::Validation,
                AgentKind::Transparency,
                AgentKind::EarlyWarning,
            ]
        );

        let tracking = &result.agent_analyses[1];
        assert_eq!(tracking.status, Severity::Danger);
        assert!(tracking.analysis.contains("SLA breached"));
        assert!(tracking.analysis.contains("Days open: 12/7."));

        assert_eq!(result.timeline.len(), 2);
        assert_eq!(result.timeline[1].date, NaiveDate::from_ymd_opt(2026, 10, 5).unwrap());
    }

    #[test]
    fn test_duplicate_submission_is_flagged() {
        let mut engine = engine(1);
        let first = engine.analyze_road(&road_form(), &[]).unwrap();

        let mut again = road_form();
        again.pothole_id = "new".to_string();
        again.location = "linking road junction".to_string();

        let second = engine.analyze_road(&again, &[first.pothole]).unwrap();
        assert!(second.pothole.id.starts_with("PH-MA-MUM-"));
        assert_eq!(second.agent_analyses[0].status, Severity::Warning);
        assert!(second.agent_analyses[0].analysis.starts_with("DUPLICATE DETECTED"));
    }

    #[test]
    fn test_unknown_contractor_uses_fallback() {
        let mut form = road_form();
        form.contractor = "Nagar Nigam Ward 9".to_string();

        let result = engine(1).analyze_road(&form, &[]).unwrap();
        assert_eq!(result.contractor_score, ContractorScore::fallback("Nagar Nigam Ward 9"));
    }

    #[test]
    fn test_injected_score_provider() {
        let mut scores = HashMap::new();
        let mut poor = ContractorScore::fallback("IRB Infrastructure");
        poor.score = 41;
        scores.insert(poor.name.clone(), poor);

        let mut engine = Engine::builder().clock(clock()).seed(1).scores(scores).build();
        let result = engine.analyze_road(&road_form(), &[]).unwrap();

        let ids: Vec<&str> = result.alerts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["alert-sla-PH-MA-MUM-0042", "alert-perf-IRB Infrastructure"]);
    }

    #[test]
    fn test_invalid_form_is_rejected() {
        let mut form = road_form();
        form.expected_sla_days = 0;

        match engine(1).analyze_road(&form, &[]) {
            Err(EngineError::Validation(err)) => assert_eq!(err.field, "expected_sla_days"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_same_seed_same_supply_result() {
        let a = engine(42).analyze_supply(&supply_form(), &[]).unwrap();
        let b = engine(42).analyze_supply(&supply_form(), &[]).unwrap();
        assert_eq!(a, b);
        assert!(a.supplier.id.starts_with("SUP-TA-"));
    }

    #[test]
    fn test_critical_supply_scenario() {
        let result = engine(7).analyze_supply(&supply_form(), &[]).unwrap();

        assert_eq!(result.supplier.phantom_stock_percentage, 35.0);
        assert_eq!(result.supplier.disruption_risk, RiskTier::Critical);
        assert_eq!(result.agent_analyses.len(), 7);
        assert!(result
            .agent_analyses
            .iter()
            .all(|a| a.project == Project::PhantomX));

        let ids: Vec<String> = result.alerts.iter().map(|a| a.id.clone()).collect();
        let id = &result.supplier.id;
        assert_eq!(
            ids,
            vec![
                format!("alert-phantom-{id}"),
                format!("alert-disruption-{id}"),
                format!("alert-capacity-{id}"),
                "alert-perf-Sundram Fasteners".to_string(),
            ]
        );

        // audit, discrepancy, status change
        assert_eq!(result.timeline.len(), 3);
        assert_eq!(result.timeline[2].date, clock().today());
    }

    #[test]
    fn test_value_entry_point_reports_schema_errors() {
        let payload = serde_json::json!({
            "location": "Anna Salai",
            "city": "Chennai",
        });

        assert!(matches!(
            engine(1).analyze_road_value(payload, &[]),
            Err(EngineError::Schema(_))
        ));
    }

    #[test]
    fn test_value_entry_point_analyzes() {
        let payload = serde_json::to_value(road_form()).unwrap();
        let result = engine(1).analyze_road_value(payload, &[]).unwrap();
        assert_eq!(result.pothole.id, "PH-MA-MUM-0042");
    }

    #[test]
    fn test_from_config() {
        let config = EngineConfig::from_yaml("seed: 9").unwrap();
        let mut a = Engine::from_config(&config).unwrap();
        let mut b = Engine::from_config(&config).unwrap();

        let first = a.analyze_supply(&supply_form(), &[]).unwrap();
        let second = b.analyze_supply(&supply_form(), &[]).unwrap();
        assert_eq!(first.supplier.id, second.supplier.id);
        assert_eq!(first.supplier_score, second.supplier_score);
    }
}
