//! Lifecycle Tracking Agent
//!
//! **Question**: Where is this entity in its lifecycle, and is it on time?
//!
//! For potholes the status message is followed by an SLA clause and the
//! days-open tally; the SLA status sets the severity. Suppliers are judged
//! on lifecycle status alone.

use crate::messages::Message;
use crate::types::{
    AgentKind, Pothole, PotholeStatus, Severity, SlaStatus, Supplier, SupplierStatus,
};

use super::{Agent, AgentContext, Narrative};

/// The lifecycle tracking agent.
pub struct TrackingAgent;

impl TrackingAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TrackingAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent<Pothole> for TrackingAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::LifecycleTracking
    }

    fn narrate(&self, ctx: &AgentContext<'_, Pothole>) -> Narrative {
        let pothole = ctx.entity;

        let status_key = match pothole.status {
            PotholeStatus::Reported => "lifecycle.reported",
            PotholeStatus::Assigned => "lifecycle.assigned",
            PotholeStatus::InProgress => "lifecycle.in_progress",
            PotholeStatus::Repaired => "lifecycle.repaired",
            PotholeStatus::Closed => "lifecycle.closed",
        };

        let (sla_key, severity) = match pothole.sla_status {
            SlaStatus::OnTrack => ("sla.on_track", Severity::Success),
            SlaStatus::AtRisk => ("sla.at_risk", Severity::Warning),
            SlaStatus::Breached => ("sla.breached", Severity::Danger),
        };

        Narrative::new(
            severity,
            vec![
                Message::new(status_key),
                Message::new(sla_key),
                Message::new("lifecycle.days_open"),
            ],
        )
    }
}

impl Agent<Supplier> for TrackingAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::LifecycleTracking
    }

    fn narrate(&self, ctx: &AgentContext<'_, Supplier>) -> Narrative {
        let (key, severity) = match ctx.entity.status {
            SupplierStatus::Active => ("lifecycle.active", Severity::Success),
            SupplierStatus::AtRisk => ("lifecycle.at_risk", Severity::Warning),
            SupplierStatus::Disrupted => ("lifecycle.disrupted", Severity::Danger),
            SupplierStatus::Resolved => ("lifecycle.resolved", Severity::Info),
            SupplierStatus::Blacklisted => ("lifecycle.blacklisted", Severity::Danger),
        };

        Narrative::single(severity, Message::new(key))
    }
}
