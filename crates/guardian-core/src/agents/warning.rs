//! Alert & Early Warning Agent
//!
//! **Question**: Does anything here need escalating right now?
//!
//! Collects every applicable issue into one message. Severity escalates
//! with the worst issue found; seasonal and capacity notes are listed but
//! never raise it.

use crate::classify::{CAPACITY_LIMIT_PERCENT, PHANTOM_CRITICAL_PERCENT};
use crate::messages::Message;
use crate::scoring::MODERATE_SCORE;
use crate::types::{AgentKind, Pothole, RiskTier, Severity, SlaStatus, Supplier};

use super::{Agent, AgentContext, Badge, Narrative};

/// Badge shown when a supplier has nothing to escalate.
const ALL_CLEAR_BADGE: Badge = Badge::new("bell", "success");

/// The early warning agent.
pub struct EarlyWarningAgent;

impl EarlyWarningAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EarlyWarningAgent {
    fn default() -> Self {
        Self::new()
    }
}

/// Issues found so far and the severity they add up to.
struct Issues {
    items: Vec<Message>,
    severity: Severity,
}

impl Issues {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            severity: Severity::Success,
        }
    }

    fn raise(&mut self, item: Message, severity: Severity) {
        self.items.push(item);
        self.severity = self.severity.max(severity);
    }

    fn note(&mut self, item: Message) {
        self.items.push(item);
    }

    fn into_narrative(self) -> Option<Narrative> {
        if self.items.is_empty() {
            return None;
        }

        let triggered = Message::new("warning.triggered").items(self.items);
        Some(Narrative::single(self.severity, triggered))
    }
}

impl Agent<Pothole> for EarlyWarningAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::EarlyWarning
    }

    fn narrate(&self, ctx: &AgentContext<'_, Pothole>) -> Narrative {
        let pothole = ctx.entity;
        let mut issues = Issues::new();

        match pothole.sla_status {
            SlaStatus::Breached => {
                issues.raise(Message::new("warning.sla_breached"), Severity::Danger)
            }
            SlaStatus::AtRisk => issues.raise(Message::new("warning.sla_at_risk"), Severity::Warning),
            SlaStatus::OnTrack => {}
        }

        if ctx.score.score < MODERATE_SCORE {
            issues.raise(Message::new("warning.low_score"), Severity::Warning);
        }

        if pothole.recurred_recently() {
            issues.raise(Message::new("warning.recurrence"), Severity::Danger);
        }

        if pothole.monsoon_impact {
            issues.note(Message::new("warning.seasonal"));
        }

        issues
            .into_narrative()
            .unwrap_or_else(|| Narrative::single(Severity::Success, Message::new("warning.clear")))
    }
}

impl Agent<Supplier> for EarlyWarningAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::EarlyWarning
    }

    fn narrate(&self, ctx: &AgentContext<'_, Supplier>) -> Narrative {
        let supplier = ctx.entity;
        let mut issues = Issues::new();

        if supplier.phantom_stock_percentage > PHANTOM_CRITICAL_PERCENT {
            issues.raise(Message::new("warning.phantom"), Severity::Danger);
        }

        match supplier.disruption_risk {
            RiskTier::Critical => {
                issues.raise(Message::new("warning.disruption_critical"), Severity::Danger)
            }
            RiskTier::High => {
                issues.raise(Message::new("warning.disruption_high"), Severity::Warning)
            }
            RiskTier::Medium | RiskTier::Low => {}
        }

        if ctx.score.score < MODERATE_SCORE {
            issues.raise(Message::new("warning.low_score"), Severity::Warning);
        }

        if supplier.current_utilization > CAPACITY_LIMIT_PERCENT {
            issues.note(Message::new("warning.capacity"));
        }

        issues.into_narrative().unwrap_or_else(|| {
            Narrative::single(Severity::Success, Message::new("warning.clear"))
                .with_badge(ALL_CLEAR_BADGE)
        })
    }
}
