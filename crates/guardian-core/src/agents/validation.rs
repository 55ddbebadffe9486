//! Validation & Anomaly Detection Agent
//!
//! **Question**: Does the record show signs of poor quality or misreporting?
//!
//! Potholes are checked for repeat failures, suppliers for phantom stock.

use crate::classify::{PHANTOM_CRITICAL_PERCENT, PHANTOM_DISCREPANCY_PERCENT};
use crate::messages::Message;
use crate::types::{AgentKind, Pothole, Severity, Supplier};

use super::{Agent, AgentContext, Badge, Narrative};

/// Badge shown when a supplier's stock checks out.
const VERIFIED_BADGE: Badge = Badge::new("check-circle", "agent-contractor");

/// The validation agent.
pub struct ValidationAgent;

impl ValidationAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ValidationAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent<Pothole> for ValidationAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Validation
    }

    fn narrate(&self, ctx: &AgentContext<'_, Pothole>) -> Narrative {
        let pothole = ctx.entity;

        if !pothole.previous_repairs {
            return Narrative::single(Severity::Success, Message::new("validation.first_report"));
        }

        if pothole.recurred_recently() {
            return Narrative::single(Severity::Danger, Message::new("validation.recurrence"));
        }

        let key = match pothole.days_since_last_repair {
            Some(_) => "validation.repeat",
            None => "validation.repeat_undated",
        };
        Narrative::single(Severity::Warning, Message::new(key))
    }
}

impl Agent<Supplier> for ValidationAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Validation
    }

    fn narrate(&self, ctx: &AgentContext<'_, Supplier>) -> Narrative {
        let phantom = ctx.entity.phantom_stock_percentage;

        if phantom > PHANTOM_CRITICAL_PERCENT {
            Narrative::single(Severity::Danger, Message::new("validation.phantom_critical"))
        } else if phantom > PHANTOM_DISCREPANCY_PERCENT {
            Narrative::single(Severity::Warning, Message::new("validation.discrepancy"))
        } else {
            Narrative::single(Severity::Success, Message::new("validation.verified"))
                .with_badge(VERIFIED_BADGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MessageCatalog;
    use crate::types::fixtures::{contractor, pothole, supplier, supplier_score};

    fn road_narrative(previous: bool, days: Option<u32>) -> Narrative {
        let mut p = pothole();
        p.previous_repairs = previous;
        p.days_since_last_repair = days;
        let score = contractor(88);
        let ctx = AgentContext::new(&p, &score, &[]);
        ValidationAgent::new().narrate(&ctx)
    }

    #[test]
    fn test_first_report() {
        let n = road_narrative(false, None);
        assert_eq!(n.severity, Severity::Success);
        assert_eq!(n.keys(), vec!["validation.first_report"]);
    }

    #[test]
    fn test_recurrence_within_window() {
        let n = road_narrative(true, Some(45));
        assert_eq!(n.severity, Severity::Danger);
        assert_eq!(n.keys(), vec!["validation.recurrence"]);
    }

    #[test]
    fn test_same_day_failure_is_recurrence() {
        assert_eq!(road_narrative(true, Some(0)).severity, Severity::Danger);
    }

    #[test]
    fn test_old_repeat_repair() {
        let n = road_narrative(true, Some(200));
        assert_eq!(n.severity, Severity::Warning);
        assert_eq!(n.keys(), vec!["validation.repeat"]);
    }

    #[test]
    fn test_undated_repeat_repair() {
        let n = road_narrative(true, None);
        assert_eq!(n.severity, Severity::Warning);
        assert_eq!(n.keys(), vec!["validation.repeat_undated"]);
    }

    #[test]
    fn test_recurrence_text() {
        let mut p = pothole();
        p.previous_repairs = true;
        p.days_since_last_repair = Some(30);
        let score = contractor(88);
        let ctx = AgentContext::new(&p, &score, &[]);

        let analysis = ValidationAgent::new().evaluate(&ctx, &MessageCatalog::new());
        assert!(analysis
            .analysis
            .starts_with("HIGH RECURRENCE RISK: This pothole at Linking Road Junction, Mumbai failed 30 days"));
        assert_eq!(analysis.icon, "shield");
    }

    #[test]
    fn test_supplier_phantom_bands() {
        let mut s = supplier();
        let score = supplier_score(80);

        for (phantom, severity) in [
            (25.0, Severity::Danger),
            (20.0, Severity::Warning),
            (10.5, Severity::Warning),
            (10.0, Severity::Success),
        ] {
            s.phantom_stock_percentage = phantom;
            let ctx = AgentContext::new(&s, &score, &[]);
            assert_eq!(ValidationAgent::new().narrate(&ctx).severity, severity, "{phantom}");
        }
    }

    #[test]
    fn test_phantom_text_formats_counts() {
        let mut s = supplier();
        s.reported_stock = 12_500;
        s.actual_stock = Some(9_000);
        s.phantom_stock_percentage = 28.0;
        let score = supplier_score(55);
        let ctx = AgentContext::new(&s, &score, &[]);

        let analysis = ValidationAgent::new().evaluate(&ctx, &MessageCatalog::new());
        assert_eq!(analysis.icon, "alert-octagon");
        assert!(analysis
            .analysis
            .contains("reports 12,500 units but actual stock is 9,000 (28.0% discrepancy)"));
    }

    #[test]
    fn test_verified_supplier_badge() {
        let s = supplier();
        let score = supplier_score(80);
        let ctx = AgentContext::new(&s, &score, &[]);

        let analysis = ValidationAgent::new().evaluate(&ctx, &MessageCatalog::new());
        assert_eq!(analysis.icon, "check-circle");
        assert_eq!(analysis.color, "agent-contractor");
        assert!(analysis.analysis.contains("(0.0%)"));
    }
}
