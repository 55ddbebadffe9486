//! Message catalog for agent narratives, timelines and alerts.
//!
//! Every user-facing sentence lives here as a template keyed by project and
//! message kind. Agents choose *which* messages apply; the catalog decides
//! *how* they read. Overrides loaded from YAML replace individual templates,
//! which is how a deployment localises the wording.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::types::Project;

lazy_static! {
    /// `{name}` placeholders inside templates.
    static ref PLACEHOLDER: Regex = Regex::new(r"\{([a-z_]+)\}").unwrap();
}

/// Errors from building a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Unknown message key '{key}' for project {project}")]
    UnknownKey { project: Project, key: String },

    #[error("Failed to parse message overrides: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Template variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vars(BTreeMap<&'static str, String>);

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, replacing any previous value.
    pub fn with(mut self, name: &'static str, value: impl ToString) -> Self {
        self.0.insert(name, value.to_string());
        self
    }

    /// Merge `other` into `self`; `other` wins on collisions.
    pub fn merge(mut self, other: Vars) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// A selected message: a catalog key plus what it needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub key: &'static str,
    pub vars: Vars,
    /// Sub-messages rendered first and bound to a variable name
    pub nested: Vec<(&'static str, Message)>,
    /// Sub-messages rendered, joined with ". " and bound to `{items}`
    pub items: Vec<Message>,
}

impl Message {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            vars: Vars::new(),
            nested: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn vars(mut self, vars: Vars) -> Self {
        self.vars = self.vars.merge(vars);
        self
    }

    pub fn nest(mut self, name: &'static str, message: Message) -> Self {
        self.nested.push((name, message));
        self
    }

    pub fn items(mut self, items: Vec<Message>) -> Self {
        self.items = items;
        self
    }
}

/// Resource bundle of message templates.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    overrides: BTreeMap<Project, BTreeMap<String, String>>,
}

impl MessageCatalog {
    /// Catalog with the built-in templates only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with some built-in templates replaced.
    ///
    /// Every overridden key must exist in the built-in set for its project.
    pub fn with_overrides(
        overrides: BTreeMap<Project, BTreeMap<String, String>>,
    ) -> Result<Self, CatalogError> {
        for (project, templates) in &overrides {
            for key in templates.keys() {
                if builtin(*project, key).is_none() {
                    return Err(CatalogError::UnknownKey {
                        project: *project,
                        key: key.clone(),
                    });
                }
            }
        }

        Ok(Self { overrides })
    }

    /// Parse overrides from YAML of the form `project: { key: template }`.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let overrides: BTreeMap<Project, BTreeMap<String, String>> = serde_yaml::from_str(yaml)?;
        Self::with_overrides(overrides)
    }

    /// Look up the template for a key.
    pub fn template(&self, project: Project, key: &str) -> Option<&str> {
        self.overrides
            .get(&project)
            .and_then(|templates| templates.get(key))
            .map(String::as_str)
            .or_else(|| builtin(project, key))
    }

    /// Render a message. Unknown placeholders are left as written.
    pub fn render(&self, project: Project, message: &Message) -> String {
        self.render_with(project, message, &Vars::new())
    }

    /// Render a message over a set of base variables.
    ///
    /// `base` is visible to nested messages and items as well; a message's
    /// own variables win over it.
    pub fn render_with(&self, project: Project, message: &Message, base: &Vars) -> String {
        let Some(template) = self.template(project, message.key) else {
            tracing::warn!(project = %project, key = message.key, "Missing message template");
            return message.key.to_string();
        };

        let mut vars = base.clone().merge(message.vars.clone());
        for (name, nested) in &message.nested {
            vars = vars.with(*name, self.render_with(project, nested, base));
        }
        if !message.items.is_empty() {
            let items: Vec<String> = message
                .items
                .iter()
                .map(|item| self.render_with(project, item, base))
                .collect();
            vars = vars.with("items", items.join(". "));
        }

        PLACEHOLDER
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render several messages as one paragraph.
    pub fn render_all(&self, project: Project, messages: &[Message], base: &Vars) -> String {
        messages
            .iter()
            .map(|m| self.render_with(project, m, base))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Format a count with thousands separators (`12345` -> `12,345`).
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn builtin(project: Project, key: &str) -> Option<&'static str> {
    let table = match project {
        Project::RoadGuardian => ROAD_TEMPLATES,
        Project::PhantomX => SUPPLY_TEMPLATES,
    };

    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, template)| *template)
}

const ROAD_TEMPLATES: &[(&str, &str)] = &[
    // Ingestion
    ("ingest.duplicate", "DUPLICATE DETECTED: Pothole at \"{location}\", {city}, {state} already exists. Merging with existing municipal record."),
    ("ingest.new", "NEW POTHOLE REGISTERED: ID {id} at {location}, {city}, {state}. Logged in National Road Infrastructure Database."),
    ("ingest.seasonal", "Monsoon season active - expedited SLA recommended."),
    // Lifecycle
    ("lifecycle.reported", "Pothole logged in {city} Municipal Corporation system. Awaiting ULB contractor assignment (24-48 hours)."),
    ("lifecycle.assigned", "{contractor} assigned by {city} Municipal Corporation. Work order generated per IRC guidelines."),
    ("lifecycle.in_progress", "Repair work actively underway. Contractor on-site per PWD standards. Materials deployed."),
    ("lifecycle.repaired", "Physical repair completed. Entering 30-day IRC quality monitoring period."),
    ("lifecycle.closed", "Repair verified and case closed. Road surface restored to BIS standards."),
    ("sla.on_track", "Timeline within State ULB SLA bounds."),
    ("sla.at_risk", "WARNING: Approaching municipal SLA deadline. Escalation to Commissioner may be triggered."),
    ("sla.breached", "CRITICAL: SLA breached. Automatic escalation to District Collector initiated."),
    ("lifecycle.days_open", "Days open: {days_open}/{expected_sla}."),
    // Scoring
    ("scoring.excellent", "{actor} demonstrates EXCELLENT performance (Score: {score}/100). Meets NHAI quality standards. Avg response: {avg_response_time}h. Eligible for tender preference."),
    ("scoring.moderate", "{actor} shows MODERATE performance (Score: {score}/100). Some delays noted. Repeat issue rate: {repeat_occurrence}%. Under enhanced PWD monitoring."),
    ("scoring.poor", "ALERT: {actor} has POOR performance (Score: {score}/100). High repeat occurrence ({repeat_occurrence}%). Recommend blacklisting review per GFR 2017 guidelines."),
    // Validation
    ("validation.recurrence", "HIGH RECURRENCE RISK: This pothole at {location}, {city} failed {days_since_last_repair} days after previous repair. Indicates potential substandard materials or underlying drainage issues. IRC Section 500 investigation recommended."),
    ("validation.repeat", "REPEAT REPAIR: Previous repair was {days_since_last_repair} days ago. Within acceptable IRC durability range but flagged for quality monitoring."),
    ("validation.repeat_undated", "REPEAT REPAIR: A previous repair is on record without a date. Flagged for quality monitoring."),
    ("validation.first_report", "First-time report. No prior repair history. Standard IRC quality protocols apply. Expected durability: 2-5 years based on traffic classification."),
    // Transparency
    ("transparency.update", "नागरिक अपडेट (Citizen Update): Status - {status_label}. {progress} Location: {location}, {city}."),
    ("transparency.label.reported", "दर्ज (Registered)"),
    ("transparency.label.assigned", "ठेकेदार नियुक्त (Contractor Assigned)"),
    ("transparency.label.in_progress", "मरम्मत जारी (Repair Ongoing)"),
    ("transparency.label.repaired", "मरम्मत पूर्ण (Repair Complete)"),
    ("transparency.label.closed", "समाप्त (Closed)"),
    ("transparency.progress.reported", "Your complaint has been received. A contractor will be assigned within 48 hours. Track status on CPGRAMS."),
    ("transparency.progress.assigned", "{contractor} has been assigned. Work will begin soon. You will receive SMS updates."),
    ("transparency.progress.in_progress", "Repair work is happening now. Thank you for your patience. You can verify progress on-site."),
    ("transparency.progress.repaired", "Great news! The repair is complete. We request you to verify the quality. Report if issues persist."),
    ("transparency.progress.closed", "This issue has been fully resolved. Thank you for being an active citizen of {city}!"),
    // Early warning
    ("warning.sla_breached", "SLA BREACH - Escalation to {city} Municipal Commissioner & District Collector"),
    ("warning.sla_at_risk", "SLA at risk - Automated reminder sent to contractor and ULB"),
    ("warning.low_score", "Underperforming contractor flagged (Score: {score}) - Review under GFR 2017"),
    ("warning.recurrence", "Quality concern - Repeat failure within 90 days per IRC guidelines"),
    ("warning.seasonal", "Monsoon period active - Enhanced monitoring and expedited repair required"),
    ("warning.triggered", "ACCOUNTABILITY ALERTS: {items}. Notifications sent to relevant authorities via CPGRAMS."),
    ("warning.clear", "All accountability metrics within acceptable parameters. Standard monitoring continues. No escalation required."),
    // Timeline
    ("timeline.reported", "Pothole reported by citizen at {location}, {city}, {state}. Logged in National Infrastructure Database."),
    ("timeline.assigned", "{contractor} assigned by {city} Municipal Corporation. Work Order #WO-{work_order} generated."),
    ("timeline.in_progress", "Contractor on-site. Repair work commenced per IRC/MoRTH specifications."),
    ("timeline.repaired", "Physical repair completed. 30-day quality monitoring period initiated."),
    ("timeline.closed", "Quality verified. Case closed. Road restored to BIS/IRC standards."),
    // Alerts
    ("alert.sla_breach.title", "SLA Breach - Municipal Escalation"),
    ("alert.sla_breach.description", "Pothole {id} at {location}, {city} has exceeded the {expected_sla}-day ULB SLA. Escalation to District Collector initiated."),
    ("alert.sla_risk.title", "SLA At Risk"),
    ("alert.sla_risk.description", "Pothole {id} at {location}, {city} has {sla_remaining} days remaining before the {expected_sla}-day SLA is breached."),
    ("alert.performance.title", "Contractor Review Required"),
    ("alert.performance.description", "{actor} has score {score}/100. Review under GFR 2017 blacklisting guidelines recommended."),
    ("alert.quality.title", "Repeat Failure - Quality Investigation"),
    ("alert.quality.description", "Pothole at {location} failed {days_since_last_repair} days after repair. IRC Section 500 quality investigation required."),
];

const SUPPLY_TEMPLATES: &[(&str, &str)] = &[
    // Ingestion
    ("ingest.duplicate", "DUPLICATE: Supplier \"{name}\" at {city}, {state} already tracked. Merging with existing record."),
    ("ingest.new", "SUPPLIER REGISTERED: {name} ({tier}) at {city}, {state}. Added to Make-in-India Supply Chain Database."),
    // Lifecycle
    ("lifecycle.active", "Supplier {name} operating normally. Utilization: {utilization}%. Lead time: {lead_time} days."),
    ("lifecycle.at_risk", "WARNING: {name} showing risk indicators. Utilization: {utilization}%. Monitoring intensified."),
    ("lifecycle.disrupted", "CRITICAL: {name} operations disrupted. Supply chain continuity at risk. Alternate sourcing recommended."),
    ("lifecycle.resolved", "{name} disruption resolved. Operations returning to normal. Monitoring continues."),
    ("lifecycle.blacklisted", "{name} has been blacklisted due to repeated violations. Removed from approved supplier list."),
    // Prediction
    ("prediction.low", "Low disruption probability for {name}. Supply chain stable. No preventive action needed."),
    ("prediction.medium", "Medium risk detected for {name}. Regional factors (monsoon/transport) may cause 5-10 day delays. Buffer stock recommended."),
    ("prediction.high", "HIGH RISK: {name} likely to face disruption within 7-14 days. Utilization {utilization}% indicates capacity strain. Initiate alternate sourcing."),
    ("prediction.critical", "CRITICAL PREDICTION: {name} disruption imminent. Phantom stock {phantom}%. Immediate action required to prevent production line impact."),
    // Validation
    ("validation.phantom_critical", "PHANTOM STOCK DETECTED: {name} reports {reported_stock} units but actual stock is {actual_stock} ({phantom}% discrepancy). Likely causes: Data entry errors, inventory theft, or deliberate misreporting."),
    ("validation.discrepancy", "MODERATE DISCREPANCY: {name} stock variance of {phantom}%. Within tolerance but requires audit within 30 days."),
    ("validation.verified", "VERIFIED: {name} stock levels validated. Reported vs actual within acceptable variance ({phantom}%). No anomalies detected."),
    // Scoring
    ("scoring.excellent", "{actor} rated EXCELLENT ({score}/100). Stock accuracy: {accuracy_rate}%. On-time delivery: {delivery_on_time}%. Recommended for Make-in-India priority contracts."),
    ("scoring.moderate", "{actor} rated MODERATE ({score}/100). {phantom_stock_incidents} phantom stock incidents recorded. Enhanced monitoring active."),
    ("scoring.poor", "ALERT: {actor} rated POOR ({score}/100). {phantom_stock_incidents} phantom incidents. Consider removal from approved vendor list per MSME guidelines."),
    // Transparency
    ("transparency.update", "Supply Chain Update for {name}:\n- Location: {city}, {state}\n- Tier: {tier}\n- Current Status: {status}\n- Stock Accuracy: {stock_accuracy}%\n- Lead Time: {lead_time} days\n\n{action}"),
    ("transparency.action_required", "ACTION REQUIRED: Discuss alternate sourcing with procurement team."),
    ("transparency.no_action", "No immediate action required. Regular monitoring continues."),
    // Early warning
    ("warning.phantom", "Critical phantom stock detected ({phantom}%)"),
    ("warning.disruption_critical", "Disruption imminent - activate contingency suppliers"),
    ("warning.disruption_high", "High disruption risk - buffer stock recommended"),
    ("warning.low_score", "Underperforming supplier (Score: {score})"),
    ("warning.capacity", "Capacity constraint - supplier at 95%+ utilization"),
    ("warning.triggered", "SUPPLY CHAIN ALERTS: {items}. Procurement and operations teams notified."),
    ("warning.clear", "All supply chain metrics within acceptable parameters. Make-in-India resilience maintained."),
    // Timeline
    ("timeline.audit_completed", "Last audit completed for {name}. Stock levels verified at {city} facility."),
    ("timeline.discrepancy_detected", "Stock discrepancy of {phantom}% detected. Investigation initiated."),
    ("timeline.status_changed", "Supplier status changed to {status_lower}. Enhanced monitoring activated."),
    // Alerts
    ("alert.phantom.title", "Critical Phantom Stock Detected"),
    ("alert.phantom.description", "{name} at {city} showing {phantom}% stock discrepancy. Immediate audit required."),
    ("alert.disruption.title", "Supply Disruption Imminent"),
    ("alert.disruption.description", "{name} predicted to face disruption. Activate contingency suppliers for {tier_lower} components."),
    ("alert.capacity.title", "Supplier Capacity Critical"),
    ("alert.capacity.description", "{name} operating at {utilization}% capacity. Risk of delayed deliveries."),
    ("alert.performance.title", "Supplier Review Required"),
    ("alert.performance.description", "{actor} has score {score}/100. Review under MSME vendor guidelines recommended."),
];
