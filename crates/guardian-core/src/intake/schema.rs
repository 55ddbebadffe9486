//! JSON Schema checks for raw form submissions.
//!
//! Forms arriving as JSON or YAML are checked against
//! `schema/road_form.schema.json` or `schema/supply_form.schema.json` before
//! they are deserialized, so structural problems are all reported at once.

use std::sync::OnceLock;

use super::validate::ValidationError;

const ROAD_FORM_SCHEMA_JSON: &str = include_str!("../../../../schema/road_form.schema.json");
const SUPPLY_FORM_SCHEMA_JSON: &str = include_str!("../../../../schema/supply_form.schema.json");

static ROAD_FORM_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();
static SUPPLY_FORM_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

fn compile(source: &str) -> Result<jsonschema::Validator, String> {
    let schema_value: serde_json::Value = match serde_json::from_str(source) {
        Ok(v) => v,
        Err(e) => return Err(format!("Invalid schema JSON: {}", e)),
    };

    match jsonschema::options().build(&schema_value) {
        Ok(v) => Ok(v),
        Err(e) => Err(format!("Failed to compile schema: {}", e)),
    }
}

fn check(
    cell: &'static OnceLock<Result<jsonschema::Validator, String>>,
    source: &str,
    value: &serde_json::Value,
) -> Result<(), Vec<ValidationError>> {
    let validator = match cell.get_or_init(|| compile(source)) {
        Ok(v) => v,
        Err(e) => return Err(vec![ValidationError::new("$schema", e.clone())]),
    };

    let errors: Vec<ValidationError> = validator
        .iter_errors(value)
        .map(|e| ValidationError::new(field_name(&e.instance_path.to_string()), e.to_string()))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `/expected_sla_days` becomes `expected_sla_days`; the document root is `$`.
fn field_name(pointer: &str) -> String {
    let trimmed = pointer.trim_start_matches('/');
    if trimmed.is_empty() {
        "$".to_string()
    } else {
        trimmed.replace('/', ".")
    }
}

/// Check a raw road form against its schema.
pub fn check_road_form(value: &serde_json::Value) -> Result<(), Vec<ValidationError>> {
    check(&ROAD_FORM_SCHEMA, ROAD_FORM_SCHEMA_JSON, value)
}

/// Check a raw supplier form against its schema.
pub fn check_supply_form(value: &serde_json::Value) -> Result<(), Vec<ValidationError>> {
    check(&SUPPLY_FORM_SCHEMA, SUPPLY_FORM_SCHEMA_JSON, value)
}
