//! Accountability & Scoring Agent
//!
//! **Question**: How well has the responsible actor performed?

use crate::messages::Message;
use crate::scoring::ScoreBand;
use crate::types::{ActorScore, AgentKind, Severity, Subject};

use super::{Agent, AgentContext, Narrative};

/// The scoring agent. Bands the actor's composite score.
pub struct ScoringAgent;

impl ScoringAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ScoringAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Subject> Agent<E> for ScoringAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Scoring
    }

    fn narrate(&self, ctx: &AgentContext<'_, E>) -> Narrative {
        let (key, severity) = match ScoreBand::of(ctx.score.score()) {
            ScoreBand::Excellent => ("scoring.excellent", Severity::Success),
            ScoreBand::Moderate => ("scoring.moderate", Severity::Warning),
            ScoreBand::Poor => ("scoring.poor", Severity::Danger),
        };

        Narrative::single(severity, Message::new(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MessageCatalog;
    use crate::types::fixtures::{contractor, pothole, supplier, supplier_score};

    #[test]
    fn test_contractor_bands() {
        let p = pothole();
        for (score, severity) in [
            (92, Severity::Success),
            (80, Severity::Success),
            (65, Severity::Warning),
            (58, Severity::Danger),
        ] {
            let s = contractor(score);
            let ctx = AgentContext::new(&p, &s, &[]);
            assert_eq!(ScoringAgent::new().narrate(&ctx).severity, severity, "{score}");
        }
    }

    #[test]
    fn test_poor_contractor_text() {
        let p = pothole();
        let score = contractor(58);
        let ctx = AgentContext::new(&p, &score, &[]);

        let analysis = ScoringAgent::new().evaluate(&ctx, &MessageCatalog::new());
        assert_eq!(
            analysis.analysis,
            "ALERT: IRB Infrastructure has POOR performance (Score: 58/100). \
             High repeat occurrence (5%). Recommend blacklisting review per GFR 2017 guidelines."
        );
    }

    #[test]
    fn test_excellent_supplier_text() {
        let s = supplier();
        let score = supplier_score(80);
        let ctx = AgentContext::new(&s, &score, &[]);

        let analysis = ScoringAgent::new().evaluate(&ctx, &MessageCatalog::new());
        assert_eq!(analysis.icon, "award");
        assert!(analysis.analysis.contains("rated EXCELLENT (80/100)"));
        assert!(analysis.analysis.contains("On-time delivery: 85%"));
    }
}
