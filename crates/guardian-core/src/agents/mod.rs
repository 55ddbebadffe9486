//! Narrator agents.
//!
//! Each agent looks at one entity snapshot and says one thing about it. The
//! agents are independent and stateless: none reads another's output, and the
//! order they run in only fixes the index of each analysis in the result.
//!
//! An agent *selects* what to say as a [`Narrative`] (severity plus message
//! keys); the [`MessageCatalog`] turns that into text. This keeps message
//! selection testable without matching on rendered strings.

mod ingestion;
mod prediction;
mod scoring;
mod tracking;
mod transparency;
mod validation;
mod warning;

pub use ingestion::IngestionAgent;
pub use prediction::PredictionAgent;
pub use scoring::ScoringAgent;
pub use tracking::TrackingAgent;
pub use transparency::TransparencyAgent;
pub use validation::ValidationAgent;
pub use warning::EarlyWarningAgent;

use crate::messages::{Message, MessageCatalog};
use crate::types::{
    ActorScore, AgentAnalysis, AgentKind, Pothole, Project, Severity, Subject, Supplier,
};

/// What an agent gets to look at.
pub struct AgentContext<'a, E: Subject> {
    /// The entity under analysis
    pub entity: &'a E,
    /// Score of the entity's responsible actor
    pub score: &'a E::Score,
    /// Caller-owned entities seen before this one
    pub existing: &'a [E],
}

impl<'a, E: Subject> AgentContext<'a, E> {
    pub fn new(entity: &'a E, score: &'a E::Score, existing: &'a [E]) -> Self {
        Self {
            entity,
            score,
            existing,
        }
    }
}

/// Display tags for an agent card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub icon: &'static str,
    pub color: &'static str,
}

impl Badge {
    pub const fn new(icon: &'static str, color: &'static str) -> Self {
        Self { icon, color }
    }
}

/// An agent's selection, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub severity: Severity,
    /// Rendered in order and joined with a space
    pub messages: Vec<Message>,
    /// Replaces the agent's default badge when set
    pub badge: Option<Badge>,
}

impl Narrative {
    pub fn new(severity: Severity, messages: Vec<Message>) -> Self {
        Self {
            severity,
            messages,
            badge: None,
        }
    }

    pub fn single(severity: Severity, message: Message) -> Self {
        Self::new(severity, vec![message])
    }

    pub fn with_badge(mut self, badge: Badge) -> Self {
        self.badge = Some(badge);
        self
    }

    /// Message keys in order, for assertions.
    pub fn keys(&self) -> Vec<&'static str> {
        self.messages.iter().map(|m| m.key).collect()
    }
}

/// A narrator for one entity family.
pub trait Agent<E: Subject> {
    fn kind(&self) -> AgentKind;

    /// Decide what to say about the entity.
    fn narrate(&self, ctx: &AgentContext<'_, E>) -> Narrative;

    /// Narrate and render into a finished analysis.
    fn evaluate(&self, ctx: &AgentContext<'_, E>, catalog: &MessageCatalog) -> AgentAnalysis {
        let kind = self.kind();
        let narrative = self.narrate(ctx);
        let tags = narrative.badge.unwrap_or_else(|| badge(E::PROJECT, kind));
        let base = ctx.entity.vars().merge(ctx.score.vars());

        AgentAnalysis {
            agent: kind.label().to_string(),
            kind,
            icon: tags.icon.to_string(),
            color: tags.color.to_string(),
            analysis: catalog.render_all(E::PROJECT, &narrative.messages, &base),
            status: narrative.severity,
            project: E::PROJECT,
        }
    }
}

/// Fixed, ordered list of agents for one entity family.
pub type Roster<E> = Vec<Box<dyn Agent<E>>>;

/// Default display tags per project and agent.
pub fn badge(project: Project, kind: AgentKind) -> Badge {
    match (project, kind) {
        (Project::RoadGuardian, AgentKind::Ingestion) => Badge::new("eye", "agent-detection"),
        (Project::PhantomX, AgentKind::Ingestion) => Badge::new("database", "agent-detection"),
        (_, AgentKind::LifecycleTracking) => Badge::new("git-branch", "agent-tracking"),
        (_, AgentKind::Prediction) => Badge::new("trending-up", "agent-quality"),
        (Project::RoadGuardian, AgentKind::Validation) => Badge::new("shield", "agent-quality"),
        (Project::PhantomX, AgentKind::Validation) => Badge::new("alert-octagon", "agent-alert"),
        (Project::RoadGuardian, AgentKind::Scoring) => Badge::new("user-check", "agent-contractor"),
        (Project::PhantomX, AgentKind::Scoring) => Badge::new("award", "agent-contractor"),
        (Project::RoadGuardian, AgentKind::Transparency) => {
            Badge::new("clock", "agent-transparency")
        }
        (Project::PhantomX, AgentKind::Transparency) => {
            Badge::new("file-text", "agent-transparency")
        }
        (_, AgentKind::EarlyWarning) => Badge::new("alert-triangle", "agent-alert"),
    }
}

/// The six road agents, in output order.
pub fn road_roster() -> Roster<Pothole> {
    vec![
        Box::new(IngestionAgent::new()),
        Box::new(TrackingAgent::new()),
        Box::new(ScoringAgent::new()),
        Box::new(ValidationAgent::new()),
        Box::new(TransparencyAgent::new()),
        Box::new(EarlyWarningAgent::new()),
    ]
}

/// The seven supply agents, in output order.
pub fn supply_roster() -> Roster<Supplier> {
    vec![
        Box::new(IngestionAgent::new()),
        Box::new(TrackingAgent::new()),
        Box::new(PredictionAgent::new()),
        Box::new(ValidationAgent::new()),
        Box::new(ScoringAgent::new()),
        Box::new(TransparencyAgent::new()),
        Box::new(EarlyWarningAgent::new()),
    ]
}

/// Run every agent in a roster against one entity.
pub fn run_roster<E: Subject>(
    roster: &[Box<dyn Agent<E>>],
    ctx: &AgentContext<'_, E>,
    catalog: &MessageCatalog,
) -> Vec<AgentAnalysis> {
    roster
        .iter()
        .map(|agent| agent.evaluate(ctx, catalog))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::{contractor, pothole, supplier, supplier_score};

    #[test]
    fn test_road_roster_order() {
        let kinds: Vec<AgentKind> = road_roster().iter().map(|a| a.kind()).collect();
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
    }

    #[test]
    fn test_supply_roster_order() {
        let kinds: Vec<AgentKind> = supply_roster().iter().map(|a| a.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                AgentKind::Ingestion,
                AgentKind::LifecycleTracking,
                AgentKind::Prediction,
                AgentKind::Validation,
                AgentKind::Scoring,
                AgentKind::Transparency,
                AgentKind::EarlyWarning,
            ]
        );
    }

    #[test]
    fn test_run_road_roster() {
        let p = pothole();
        let score = contractor(88);
        let ctx = AgentContext::new(&p, &score, &[]);

        let analyses = run_roster(&road_roster(), &ctx, &MessageCatalog::new());

        assert_eq!(analyses.len(), 6);
        assert!(analyses.iter().all(|a| a.project == Project::RoadGuardian));
        assert_eq!(analyses[0].agent, "National Data Ingestion Agent");
        assert_eq!(analyses[0].icon, "eye");
        assert_eq!(analyses[2].color, "agent-contractor");
        // No placeholder survives rendering
        assert!(analyses.iter().all(|a| !a.analysis.contains('{')));
    }

    #[test]
    fn test_run_supply_roster() {
        let s = supplier();
        let score = supplier_score(80);
        let ctx = AgentContext::new(&s, &score, &[]);

        let analyses = run_roster(&supply_roster(), &ctx, &MessageCatalog::new());

        assert_eq!(analyses.len(), 7);
        assert!(analyses.iter().all(|a| a.project == Project::PhantomX));
        assert_eq!(analyses[2].agent, "Prediction & Forecasting Agent");
        assert!(analyses.iter().all(|a| !a.analysis.contains('{')));
    }

    #[test]
    fn test_roster_is_repeatable() {
        let p = pothole();
        let score = contractor(55);
        let ctx = AgentContext::new(&p, &score, &[]);
        let catalog = MessageCatalog::new();

        let first = run_roster(&road_roster(), &ctx, &catalog);
        let second = run_roster(&road_roster(), &ctx, &catalog);
        assert_eq!(first, second);
    }
}
