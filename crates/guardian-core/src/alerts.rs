//! Alert builders.
//!
//! Each condition is checked independently and produces at most one alert,
//! so satisfying more conditions never removes an alert. Alert ids are
//! derived from the alert kind and the entity or actor they concern; the
//! same condition on the same entity always yields the same id.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::classify::{CAPACITY_LIMIT_PERCENT, PHANTOM_CRITICAL_PERCENT};
use crate::messages::{Message, MessageCatalog, Vars};
use crate::scoring::MODERATE_SCORE;
use crate::types::{
    ActorScore, Alert, AlertKind, AlertSeverity, ContractorScore, Pothole, Project, RiskTier,
    SlaStatus, Subject, Supplier, SupplierScore,
};

/// Shared inputs for the alerts raised on one entity.
struct AlertFactory<'a> {
    project: Project,
    catalog: &'a MessageCatalog,
    vars: Vars,
    at: DateTime<Utc>,
}

impl<'a> AlertFactory<'a> {
    fn new<E: Subject>(
        entity: &E,
        score: &E::Score,
        at: DateTime<Utc>,
        catalog: &'a MessageCatalog,
    ) -> Self {
        Self {
            project: E::PROJECT,
            catalog,
            vars: entity.vars().merge(score.vars()),
            at,
        }
    }

    /// `keys` is the (title, description) message pair.
    fn build(
        &self,
        id: String,
        kind: AlertKind,
        severity: AlertSeverity,
        keys: (&'static str, &'static str),
    ) -> Alert {
        let (title, description) = keys;

        Alert {
            id,
            kind,
            severity,
            title: self.render(title),
            description: self.render(description),
            entity_id: None,
            contractor: None,
            supplier: None,
            region: None,
            timestamp: self.at,
            project: self.project,
        }
    }

    fn render(&self, key: &'static str) -> String {
        self.catalog
            .render_with(self.project, &Message::new(key), &self.vars)
    }
}

/// Alerts for a pothole and its contractor.
pub fn road_alerts(
    pothole: &Pothole,
    score: &ContractorScore,
    at: DateTime<Utc>,
    catalog: &MessageCatalog,
) -> Vec<Alert> {
    let factory = AlertFactory::new(pothole, score, at, catalog);
    let mut alerts = Vec::new();

    let located = |alert: Alert| Alert {
        entity_id: Some(pothole.id.clone()),
        contractor: Some(pothole.contractor.clone()),
        region: Some(pothole.region.clone()),
        ..alert
    };

    match pothole.sla_status {
        SlaStatus::Breached => alerts.push(located(factory.build(
            format!("alert-sla-{}", pothole.id),
            AlertKind::Delay,
            AlertSeverity::Critical,
            ("alert.sla_breach.title", "alert.sla_breach.description"),
        ))),
        SlaStatus::AtRisk => alerts.push(located(factory.build(
            format!("alert-risk-{}", pothole.id),
            AlertKind::Delay,
            AlertSeverity::High,
            ("alert.sla_risk.title", "alert.sla_risk.description"),
        ))),
        SlaStatus::OnTrack => {}
    }

    if score.score < MODERATE_SCORE {
        alerts.push(Alert {
            contractor: Some(pothole.contractor.clone()),
            ..factory.build(
                format!("alert-perf-{}", pothole.contractor),
                AlertKind::Performance,
                AlertSeverity::High,
                ("alert.performance.title", "alert.performance.description"),
            )
        });
    }

    if pothole.recurred_recently() {
        alerts.push(located(factory.build(
            format!("alert-quality-{}", pothole.id),
            AlertKind::Quality,
            AlertSeverity::High,
            ("alert.quality.title", "alert.quality.description"),
        )));
    }

    log_alerts(Project::RoadGuardian, &pothole.id, &alerts);
    alerts
}

/// Alerts for a supplier.
pub fn supply_alerts(
    supplier: &Supplier,
    score: &SupplierScore,
    at: DateTime<Utc>,
    catalog: &MessageCatalog,
) -> Vec<Alert> {
    let factory = AlertFactory::new(supplier, score, at, catalog);
    let mut alerts = Vec::new();

    let attributed = |alert: Alert| Alert {
        entity_id: Some(supplier.id.clone()),
        supplier: Some(supplier.name.clone()),
        ..alert
    };
    let located = |alert: Alert| Alert {
        region: Some(supplier.region.clone()),
        ..attributed(alert)
    };

    if supplier.phantom_stock_percentage > PHANTOM_CRITICAL_PERCENT {
        alerts.push(located(factory.build(
            format!("alert-phantom-{}", supplier.id),
            AlertKind::PhantomStock,
            AlertSeverity::Critical,
            ("alert.phantom.title", "alert.phantom.description"),
        )));
    }

    if supplier.disruption_risk == RiskTier::Critical {
        alerts.push(located(factory.build(
            format!("alert-disruption-{}", supplier.id),
            AlertKind::Disruption,
            AlertSeverity::Critical,
            ("alert.disruption.title", "alert.disruption.description"),
        )));
    }

    if supplier.current_utilization > CAPACITY_LIMIT_PERCENT {
        alerts.push(attributed(factory.build(
            format!("alert-capacity-{}", supplier.id),
            AlertKind::Capacity,
            AlertSeverity::High,
            ("alert.capacity.title", "alert.capacity.description"),
        )));
    }

    if score.score < MODERATE_SCORE {
        alerts.push(Alert {
            supplier: Some(supplier.name.clone()),
            ..factory.build(
                format!("alert-perf-{}", supplier.name),
                AlertKind::Performance,
                AlertSeverity::High,
                ("alert.performance.title", "alert.performance.description"),
            )
        });
    }

    log_alerts(Project::PhantomX, &supplier.id, &alerts);
    alerts
}

fn log_alerts(project: Project, entity: &str, alerts: &[Alert]) {
    if alerts.is_empty() {
        return;
    }

    let ids: Vec<&str> = alerts.iter().map(|a| a.id.as_str()).collect();
    tracing::debug!(project = %project, entity, alerts = ?ids, "Raised alerts");
}

/// Alerts collected across runs, keyed by id.
///
/// Posting an alert whose id is already on the board replaces the earlier
/// one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertBoard {
    alerts: BTreeMap<String, Alert>,
}

impl AlertBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alert, returning the one it replaced.
    pub fn post(&mut self, alert: Alert) -> Option<Alert> {
        self.alerts.insert(alert.id.clone(), alert)
    }

    pub fn post_all(&mut self, alerts: impl IntoIterator<Item = Alert>) {
        for alert in alerts {
            self.post(alert);
        }
    }

    pub fn get(&self, id: &str) -> Option<&Alert> {
        self.alerts.get(id)
    }

    pub fn dismiss(&mut self, id: &str) -> Option<Alert> {
        self.alerts.remove(id)
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Alerts in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.values()
    }

    pub fn for_project(&self, project: Project) -> impl Iterator<Item = &Alert> {
        self.alerts.values().filter(move |a| a.project == project)
    }
}
