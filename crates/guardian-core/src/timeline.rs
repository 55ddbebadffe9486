//! Timeline projections.
//!
//! A timeline is rebuilt in full from the entity on every run. Road events
//! are synthesised for each lifecycle stage reached so far, each at a fixed
//! day offset from the report date. The repaired and closed stages are
//! placed from `days_open` instead.

use chrono::{Days, NaiveDate};

use crate::classify::PHANTOM_DISCREPANCY_PERCENT;
use crate::messages::{Message, MessageCatalog};
use crate::types::{
    Pothole, PotholeStatus, Project, Subject, Supplier, SupplierStatus, TimelineEvent,
};

/// Day offset of a road stage from the report date.
fn stage_offset(stage: PotholeStatus, days_open: u32) -> u64 {
    match stage {
        PotholeStatus::Reported => 0,
        PotholeStatus::Assigned => 1,
        PotholeStatus::InProgress => 2,
        PotholeStatus::Repaired => u64::from(days_open.saturating_sub(1)),
        PotholeStatus::Closed => u64::from(days_open),
    }
}

fn road_message(stage: PotholeStatus) -> Message {
    Message::new(match stage {
        PotholeStatus::Reported => "timeline.reported",
        PotholeStatus::Assigned => "timeline.assigned",
        PotholeStatus::InProgress => "timeline.in_progress",
        PotholeStatus::Repaired => "timeline.repaired",
        PotholeStatus::Closed => "timeline.closed",
    })
}

/// Saturates at the last representable date instead of overflowing.
fn offset(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}

/// Events for every stage up to and including the pothole's current status.
pub fn road_timeline(pothole: &Pothole, catalog: &MessageCatalog) -> Vec<TimelineEvent> {
    let vars = pothole.vars();

    PotholeStatus::ORDER
        .iter()
        .take(pothole.status.stage() + 1)
        .map(|&stage| TimelineEvent {
            date: offset(pothole.date_reported, stage_offset(stage, pothole.days_open)),
            status: stage.as_str().to_string(),
            description: catalog.render_with(Project::RoadGuardian, &road_message(stage), &vars),
            project: Project::RoadGuardian,
        })
        .collect()
}

/// Audit, discrepancy and status-change events for a supplier.
///
/// The status-change event is dated `today`.
pub fn supply_timeline(
    supplier: &Supplier,
    today: NaiveDate,
    catalog: &MessageCatalog,
) -> Vec<TimelineEvent> {
    let vars = supplier.vars();
    let event = |date: NaiveDate, status: &str, key: &'static str| TimelineEvent {
        date,
        status: status.to_string(),
        description: catalog.render_with(Project::PhantomX, &Message::new(key), &vars),
        project: Project::PhantomX,
    };

    let mut events = vec![event(
        supplier.last_audit_date,
        "audit_completed",
        "timeline.audit_completed",
    )];

    if supplier.phantom_stock_percentage > PHANTOM_DISCREPANCY_PERCENT {
        events.push(event(
            offset(supplier.last_audit_date, 1),
            "discrepancy_detected",
            "timeline.discrepancy_detected",
        ));
    }

    if matches!(
        supplier.status,
        SupplierStatus::AtRisk | SupplierStatus::Disrupted
    ) {
        events.push(event(
            today,
            supplier.status.as_str(),
            "timeline.status_changed",
        ));
    }

    events
}
