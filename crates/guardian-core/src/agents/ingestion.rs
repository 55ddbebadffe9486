//! National Data Ingestion Agent
//!
//! **Question**: Is this a new entity, or one we already track under another id?
//!
//! Duplicate detection is a linear scan over the caller's list; the match
//! rule per entity family lives in [`Subject::is_duplicate_of`].

use crate::messages::Message;
use crate::types::{AgentKind, Severity, Subject};

use super::{Agent, AgentContext, Narrative};

/// The ingestion agent.
pub struct IngestionAgent;

impl IngestionAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IngestionAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Subject> Agent<E> for IngestionAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Ingestion
    }

    fn narrate(&self, ctx: &AgentContext<'_, E>) -> Narrative {
        let entity = ctx.entity;

        if let Some(original) = ctx.existing.iter().find(|e| entity.is_duplicate_of(e)) {
            tracing::warn!(
                project = E::PROJECT.as_str(),
                id = entity.id(),
                existing = original.id(),
                "Duplicate submission"
            );
            return Narrative::single(Severity::Warning, Message::new("ingest.duplicate"));
        }

        let mut messages = vec![Message::new("ingest.new")];
        if entity.seasonal_impact() {
            messages.push(Message::new("ingest.seasonal"));
        }

        Narrative::new(Severity::Info, messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MessageCatalog;
    use crate::types::fixtures::{contractor, pothole, supplier, supplier_score};
    use crate::types::Region;

    #[test]
    fn test_new_pothole() {
        let p = pothole();
        let score = contractor(88);
        let ctx = AgentContext::new(&p, &score, &[]);

        let narrative = IngestionAgent::new().narrate(&ctx);
        assert_eq!(narrative.severity, Severity::Info);
        assert_eq!(narrative.keys(), vec!["ingest.new"]);
    }

    #[test]
    fn test_duplicate_pothole_case_insensitive() {
        let first = pothole();
        let mut second = pothole();
        second.id = "PH-MA-MUM-9999".to_string();
        second.location = "linking road junction".to_string();
        second.region = Region::new("MUMBAI", "maharashtra");

        let existing = vec![first];
        let score = contractor(88);
        let ctx = AgentContext::new(&second, &score, &existing);

        let analysis = IngestionAgent::new().evaluate(&ctx, &MessageCatalog::new());
        assert_eq!(analysis.status, Severity::Warning);
        assert!(analysis.analysis.starts_with("DUPLICATE DETECTED"));
    }

    #[test]
    fn test_different_region_is_new() {
        let first = pothole();
        let mut second = pothole();
        second.id = "PH-KA-BEN-0001".to_string();
        second.region = Region::new("Bengaluru", "Karnataka");

        let existing = vec![first];
        let score = contractor(88);
        let ctx = AgentContext::new(&second, &score, &existing);

        assert_eq!(IngestionAgent::new().narrate(&ctx).severity, Severity::Info);
    }

    #[test]
    fn test_monsoon_note_appended() {
        let mut p = pothole();
        p.monsoon_impact = true;
        let score = contractor(88);
        let ctx = AgentContext::new(&p, &score, &[]);

        let analysis = IngestionAgent::new().evaluate(&ctx, &MessageCatalog::new());
        assert!(analysis.analysis.contains("ID PH-MA-MUM-0042"));
        assert!(analysis
            .analysis
            .ends_with("Monsoon season active - expedited SLA recommended."));
    }

    #[test]
    fn test_new_supplier_shows_tier() {
        let s = supplier();
        let score = supplier_score(80);
        let ctx = AgentContext::new(&s, &score, &[]);

        let analysis = IngestionAgent::new().evaluate(&ctx, &MessageCatalog::new());
        assert_eq!(analysis.icon, "database");
        assert!(analysis.analysis.contains("Bosch India Ltd. (TIER 2)"));
    }

    #[test]
    fn test_duplicate_supplier_by_name_and_region() {
        let first = supplier();
        let mut second = supplier();
        second.id = "SUP-KA-0100".to_string();
        second.name = "BOSCH INDIA LTD.".to_string();

        let existing = vec![first];
        let score = supplier_score(80);
        let ctx = AgentContext::new(&second, &score, &existing);

        assert_eq!(
            IngestionAgent::new().narrate(&ctx).keys(),
            vec!["ingest.duplicate"]
        );
    }
}
