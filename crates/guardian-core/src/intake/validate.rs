//! Field validation for submitted forms.
//!
//! The classifiers downstream are total, so nothing here is needed for
//! safety. Validation exists so that a malformed submission is rejected with
//! the offending field named instead of silently classified as worst case.

use chrono::{DateTime, NaiveDate};
use std::str::FromStr;
use thiserror::Error;

use super::form::{RoadForm, SupplyForm};
use crate::types::{
    PotholeStatus, Region, SupplierStatus, SupplierTier, UnknownVariant,
};

/// A rejected form field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid field '{field}': {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Typed, checked contents of a [`RoadForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct RoadFields {
    pub pothole_id: String,
    pub location: String,
    pub region: Region,
    pub date_reported: NaiveDate,
    pub contractor: String,
    pub expected_sla_days: u32,
    pub status: PotholeStatus,
    pub previous_repairs: bool,
    pub days_since_last_repair: Option<u32>,
    pub monsoon_impact: bool,
}

/// Typed, checked contents of a [`SupplyForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyFields {
    pub supplier_id: String,
    pub name: String,
    pub tier: SupplierTier,
    pub region: Region,
    pub reported_stock: u64,
    pub actual_stock: Option<u64>,
    pub production_capacity: u64,
    pub current_utilization: f64,
    pub lead_time_days: u32,
    pub status: SupplierStatus,
    pub last_audit_date: NaiveDate,
    pub regional_factors: Vec<String>,
}

impl RoadForm {
    /// Check every field, returning the first failure.
    pub fn validate(&self) -> Result<RoadFields, ValidationError> {
        Ok(RoadFields {
            pothole_id: self.pothole_id.trim().to_string(),
            location: require_text("location", &self.location)?,
            region: Region::new(
                require_text("city", &self.city)?,
                require_text("state", &self.state)?,
            ),
            date_reported: parse_date("date_reported", &self.date_reported)?,
            contractor: require_text("contractor", &self.contractor)?,
            expected_sla_days: require_positive("expected_sla_days", self.expected_sla_days)?,
            status: parse_enum("status", &self.status)?,
            previous_repairs: self.previous_repairs,
            days_since_last_repair: self
                .days_since_last_repair
                .map(|days| require_count("days_since_last_repair", days))
                .transpose()?,
            monsoon_impact: self.monsoon_impact,
        })
    }
}

impl SupplyForm {
    /// Check every field, returning the first failure.
    pub fn validate(&self) -> Result<SupplyFields, ValidationError> {
        Ok(SupplyFields {
            supplier_id: self.supplier_id.trim().to_string(),
            name: require_text("supplier_name", &self.supplier_name)?,
            tier: parse_enum("tier", &self.tier)?,
            region: Region::new(
                require_text("city", &self.city)?,
                require_text("state", &self.state)?,
            ),
            reported_stock: require_quantity("reported_stock", self.reported_stock)?,
            actual_stock: self
                .actual_stock
                .map(|stock| require_quantity("actual_stock", stock))
                .transpose()?,
            production_capacity: require_quantity(
                "production_capacity",
                self.production_capacity,
            )?,
            current_utilization: require_percentage(
                "current_utilization",
                self.current_utilization,
            )?,
            lead_time_days: require_count("lead_time_days", self.lead_time_days)?,
            status: parse_enum("status", &self.status)?,
            last_audit_date: parse_date("last_audit_date", &self.last_audit_date)?,
            regional_factors: self
                .regional_factors
                .iter()
                .map(|factor| factor.trim())
                .filter(|factor| !factor.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }
}

fn require_text(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn require_positive(field: &str, value: i64) -> Result<u32, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::new(
            field,
            format!("must be positive, got {}", value),
        ));
    }
    require_count(field, value)
}

fn require_count(field: &str, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value).map_err(|_| {
        ValidationError::new(field, format!("must be between 0 and {}, got {}", u32::MAX, value))
    })
}

fn require_quantity(field: &str, value: i64) -> Result<u64, ValidationError> {
    u64::try_from(value)
        .map_err(|_| ValidationError::new(field, format!("must not be negative, got {}", value)))
}

fn require_percentage(field: &str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::new(
            field,
            format!("must be a non-negative percentage, got {}", value),
        ));
    }
    Ok(value)
}

fn parse_enum<T>(field: &str, value: &str) -> Result<T, ValidationError>
where
    T: FromStr<Err = UnknownVariant>,
{
    value
        .trim()
        .parse()
        .map_err(|e: UnknownVariant| ValidationError::new(field, e.to_string()))
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| {
            ValidationError::new(field, format!("expected YYYY-MM-DD, got '{}'", value))
        })
}
