//! Turn validated forms into entities.
//!
//! This is where identifiers are generated and every derived field is
//! computed: days open and SLA status for potholes, phantom stock and
//! disruption risk for suppliers.

use chrono::NaiveDate;
use rand::{Rng, RngCore};

use super::form::{RoadForm, SupplyForm, NEW_ID_SENTINEL};
use super::validate::ValidationError;
use crate::classify::{calculate_phantom_stock, classify_disruption_risk, classify_sla, RiskFactors};
use crate::types::{Pothole, RiskTier, Supplier};

/// Serial numbers in generated ids are below this.
const SERIAL_LIMIT: u32 = 10_000;

/// Build a pothole from a submitted form.
///
/// `today` anchors `days_open`, which is never less than 1 even for reports
/// dated today or in the future.
pub fn normalize_road(
    form: &RoadForm,
    today: NaiveDate,
    rng: &mut dyn RngCore,
) -> Result<Pothole, ValidationError> {
    let fields = form.validate()?;

    let id = if wants_generated_id(&fields.pothole_id) {
        format!(
            "PH-{}-{}-{}",
            prefix(&fields.region.state, 2),
            prefix(&fields.region.city, 3),
            serial(rng)
        )
    } else {
        fields.pothole_id
    };

    let days_open = (today - fields.date_reported).num_days().max(1);
    let sla_status = classify_sla(days_open, i64::from(fields.expected_sla_days));

    let pothole = Pothole {
        id,
        location: fields.location,
        region: fields.region,
        date_reported: fields.date_reported,
        contractor: fields.contractor,
        expected_sla_days: fields.expected_sla_days,
        status: fields.status,
        previous_repairs: fields.previous_repairs,
        days_since_last_repair: fields.days_since_last_repair,
        days_open: u32::try_from(days_open).unwrap_or(u32::MAX),
        sla_status,
        monsoon_impact: fields.monsoon_impact,
    };

    tracing::debug!(
        id = %pothole.id,
        days_open = pothole.days_open,
        sla = pothole.sla_status.as_str(),
        "Normalized pothole"
    );

    Ok(pothole)
}

/// Build a supplier from a submitted form.
pub fn normalize_supply(
    form: &SupplyForm,
    rng: &mut dyn RngCore,
) -> Result<Supplier, ValidationError> {
    let fields = form.validate()?;

    let id = if wants_generated_id(&fields.supplier_id) {
        format!("SUP-{}-{}", prefix(&fields.region.state, 2), serial(rng))
    } else {
        fields.supplier_id
    };

    let mut supplier = Supplier {
        id,
        name: fields.name,
        tier: fields.tier,
        region: fields.region,
        reported_stock: fields.reported_stock,
        actual_stock: fields.actual_stock,
        phantom_stock_percentage: calculate_phantom_stock(
            fields.reported_stock,
            fields.actual_stock,
        ),
        production_capacity: fields.production_capacity,
        current_utilization: fields.current_utilization,
        lead_time_days: fields.lead_time_days,
        status: fields.status,
        last_audit_date: fields.last_audit_date,
        disruption_risk: RiskTier::Low,
        regional_factors: fields.regional_factors,
    };
    supplier.disruption_risk = classify_disruption_risk(&RiskFactors::from(&supplier));

    tracing::debug!(
        id = %supplier.id,
        phantom = supplier.phantom_stock_percentage,
        risk = supplier.disruption_risk.as_str(),
        "Normalized supplier"
    );

    Ok(supplier)
}

fn wants_generated_id(id: &str) -> bool {
    id.is_empty() || id.eq_ignore_ascii_case(NEW_ID_SENTINEL)
}

/// First `n` characters, uppercased. Shorter names are used whole.
fn prefix(name: &str, n: usize) -> String {
    name.chars().take(n).collect::<String>().to_uppercase()
}

fn serial(rng: &mut dyn RngCore) -> String {
    format!("{:04}", rng.gen_range(0..SERIAL_LIMIT))
}
