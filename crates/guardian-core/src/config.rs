//! Engine configuration.
//!
//! Every field is optional. An empty document gives the seeded contractor
//! table, the built-in message templates and an entropy-seeded RNG.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::messages::MessageCatalog;
use crate::scoring::ContractorTable;
use crate::types::{ContractorScore, Project};
use crate::EngineError;

/// Reference data and determinism settings for an [`Engine`].
///
/// [`Engine`]: crate::engine::Engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Seed for identifier and order-count generation
    #[serde(default)]
    pub seed: Option<u64>,

    /// Replaces the seeded contractor table when present
    #[serde(default)]
    pub contractors: Option<Vec<ContractorScore>>,

    /// Template overrides per project
    #[serde(default)]
    pub messages: BTreeMap<Project, BTreeMap<String, String>>,
}

impl EngineConfig {
    /// Parse a configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// The contractor table this configuration selects.
    pub fn contractor_table(&self) -> Result<ContractorTable, EngineError> {
        match &self.contractors {
            Some(scores) => Ok(ContractorTable::from_scores(scores.clone())?),
            None => Ok(ContractorTable::seeded()),
        }
    }

    /// The message catalog with this configuration's overrides applied.
    pub fn catalog(&self) -> Result<MessageCatalog, EngineError> {
        Ok(MessageCatalog::with_overrides(self.messages.clone())?)
    }

    fn validate(&self) -> Result<(), EngineError> {
        self.contractor_table()?;
        self.catalog()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Message;
    use crate::scoring::ScoreProvider;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EngineConfig::from_yaml("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.contractor_table().unwrap().len(), 8);
    }

    #[test]
    fn test_full_yaml_config() {
        let yaml = r#"
seed: 42
contractors:
  - name: "Ward 7 Works"
    score: 55
    avg_response_time: 60
    avg_completion_time: 9
    repeat_occurrence: 22
    total_assigned: 100
    completed: 70
messages:
  road_guardian:
    sla.on_track: "Within SLA."
"#;

        let config = EngineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.seed, Some(42));

        let table = config.contractor_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.contractor("Ward 7 Works").map(|s| s.score), Some(55));
        assert!(table.contractor("IRB Infrastructure").is_none());

        let catalog = config.catalog().unwrap();
        assert_eq!(
            catalog.render(Project::RoadGuardian, &Message::new("sla.on_track")),
            "Within SLA."
        );
    }

    #[test]
    fn test_json_config() {
        let config = EngineConfig::from_json(r#"{"seed": 7}"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert!(config.contractors.is_none());
    }

    #[test]
    fn test_invalid_contractor_is_reference_error() {
        let yaml = r#"
contractors:
  - name: "Overcounted"
    score: 70
    avg_response_time: 10
    avg_completion_time: 2
    repeat_occurrence: 5
    total_assigned: 10
    completed: 11
"#;

        let err = EngineConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, EngineError::ReferenceData(_)));
        assert!(err.to_string().contains("Overcounted"));
    }

    #[test]
    fn test_unknown_message_key_is_rejected() {
        let yaml = r#"
messages:
  phantom_x:
    lifecycle.days_open: "road only"
"#;

        assert!(matches!(
            EngineConfig::from_yaml(yaml),
            Err(EngineError::ReferenceData(_))
        ));
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        assert!(matches!(
            EngineConfig::from_yaml("sead: 1"),
            Err(EngineError::Yaml(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            EngineConfig::from_yaml_file("/nonexistent/guardian.yaml"),
            Err(EngineError::Io(_))
        ));
    }
}
