//! Transparency & Citizen Explanation Agent
//!
//! **Question**: What should the public or the procurement team be told?
//!
//! Road updates are bilingual: a Hindi status label with its English gloss,
//! then a plain-language progress note. Supply updates are a short status
//! sheet ending in an action line.

use crate::messages::Message;
use crate::types::{AgentKind, Pothole, PotholeStatus, Severity, Supplier};

use super::{Agent, AgentContext, Narrative};

/// The transparency agent. Always informational.
pub struct TransparencyAgent;

impl TransparencyAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TransparencyAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent<Pothole> for TransparencyAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Transparency
    }

    fn narrate(&self, ctx: &AgentContext<'_, Pothole>) -> Narrative {
        let (label, progress) = match ctx.entity.status {
            PotholeStatus::Reported => (
                "transparency.label.reported",
                "transparency.progress.reported",
            ),
            PotholeStatus::Assigned => (
                "transparency.label.assigned",
                "transparency.progress.assigned",
            ),
            PotholeStatus::InProgress => (
                "transparency.label.in_progress",
                "transparency.progress.in_progress",
            ),
            PotholeStatus::Repaired => (
                "transparency.label.repaired",
                "transparency.progress.repaired",
            ),
            PotholeStatus::Closed => ("transparency.label.closed", "transparency.progress.closed"),
        };

        let update = Message::new("transparency.update")
            .nest("status_label", Message::new(label))
            .nest("progress", Message::new(progress));

        Narrative::single(Severity::Info, update)
    }
}

impl Agent<Supplier> for TransparencyAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Transparency
    }

    fn narrate(&self, ctx: &AgentContext<'_, Supplier>) -> Narrative {
        let action = if ctx.entity.disruption_risk.is_elevated() {
            "transparency.action_required"
        } else {
            "transparency.no_action"
        };

        let update = Message::new("transparency.update").nest("action", Message::new(action));
        Narrative::single(Severity::Info, update)
    }
}
