//! Raw form submissions.
//!
//! Field names follow the presentation layer's form payloads. Numbers are
//! signed and enums are strings so that out-of-range input survives
//! deserialization and is rejected by validation with the field named.

use serde::{Deserialize, Serialize};

use super::schema::{check_road_form, check_supply_form};
use crate::EngineError;

/// Id value that asks the engine to generate an identifier.
pub const NEW_ID_SENTINEL: &str = "new";

/// A pothole report as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadForm {
    #[serde(default)]
    pub pothole_id: String,
    pub location: String,
    pub city: String,
    pub state: String,
    pub date_reported: String,
    pub contractor: String,
    pub expected_sla_days: i64,
    pub status: String,
    #[serde(default)]
    pub previous_repairs: bool,
    #[serde(default)]
    pub days_since_last_repair: Option<i64>,
    #[serde(default)]
    pub monsoon_impact: bool,
}

/// A supplier record as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyForm {
    #[serde(default)]
    pub supplier_id: String,
    pub supplier_name: String,
    pub tier: String,
    pub city: String,
    pub state: String,
    pub reported_stock: i64,
    #[serde(default)]
    pub actual_stock: Option<i64>,
    pub production_capacity: i64,
    pub current_utilization: f64,
    pub lead_time_days: i64,
    pub status: String,
    pub last_audit_date: String,
    #[serde(default)]
    pub regional_factors: Vec<String>,
}

impl RoadForm {
    /// Schema-check and deserialize a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, EngineError> {
        check_road_form(&value).map_err(EngineError::Schema)?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, EngineError> {
        let value: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(value)
    }
}

impl SupplyForm {
    /// Schema-check and deserialize a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, EngineError> {
        check_supply_form(&value).map_err(EngineError::Schema)?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, EngineError> {
        let value: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROAD_YAML: &str = r#"
location: "Anna Salai"
city: "Chennai"
state: "Tamil Nadu"
date_reported: "2026-10-12"
contractor: "Larsen & Toubro Infrastructure"
expected_sla_days: 10
status: "in_progress"
previous_repairs: true
days_since_last_repair: 40
"#;

    #[test]
    fn test_road_form_from_yaml_defaults_id() {
        let form = RoadForm::from_yaml(ROAD_YAML).unwrap();
        assert_eq!(form.pothole_id, "");
        assert_eq!(form.days_since_last_repair, Some(40));
        assert!(!form.monsoon_impact);
    }

    #[test]
    fn test_road_form_from_json() {
        let json = r#"{
            "pothole_id": "new",
            "location": "MG Road",
            "city": "Bengaluru",
            "state": "Karnataka",
            "date_reported": "2026-10-01",
            "contractor": "Ashoka Buildcon Ltd.",
            "expected_sla_days": 7,
            "status": "assigned"
        }"#;

        let form = RoadForm::from_json(json).unwrap();
        assert_eq!(form.pothole_id, NEW_ID_SENTINEL);
        assert_eq!(form.expected_sla_days, 7);
    }

    #[test]
    fn test_schema_failure_is_reported() {
        let json = r#"{"location": "MG Road"}"#;
        assert!(matches!(RoadForm::from_json(json), Err(EngineError::Schema(_))));
    }

    #[test]
    fn test_malformed_json_is_reported() {
        assert!(matches!(RoadForm::from_json("{"), Err(EngineError::Json(_))));
    }

    #[test]
    fn test_supply_form_from_yaml() {
        let yaml = r#"
supplier_id: "new"
supplier_name: "Motherson Sumi"
tier: "tier_2"
city: "Noida"
state: "Uttar Pradesh"
reported_stock: 12000
actual_stock: 9000
production_capacity: 4000
current_utilization: 97
lead_time_days: 16
status: "disrupted"
last_audit_date: "2026-07-15"
regional_factors: ["flooding", "labour strike"]
"#;

        let form = SupplyForm::from_yaml(yaml).unwrap();
        assert_eq!(form.actual_stock, Some(9000));
        assert_eq!(form.current_utilization, 97.0);
        assert_eq!(form.regional_factors.len(), 2);
    }
}
