//! Prediction & Forecasting Agent
//!
//! **Question**: How likely is this supplier to fail to deliver?
//!
//! Reads the disruption-risk tier computed at intake.

use crate::messages::Message;
use crate::types::{AgentKind, RiskTier, Severity, Supplier};

use super::{Agent, AgentContext, Narrative};

/// The disruption prediction agent. Supply chain only.
pub struct PredictionAgent;

impl PredictionAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PredictionAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent<Supplier> for PredictionAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Prediction
    }

    fn narrate(&self, ctx: &AgentContext<'_, Supplier>) -> Narrative {
        let (key, severity) = match ctx.entity.disruption_risk {
            RiskTier::Low => ("prediction.low", Severity::Success),
            RiskTier::Medium => ("prediction.medium", Severity::Warning),
            RiskTier::High => ("prediction.high", Severity::Warning),
            RiskTier::Critical => ("prediction.critical", Severity::Danger),
        };

        Narrative::single(severity, Message::new(key))
    }
}
