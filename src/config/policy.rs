//! Whitelist/blacklist configuration

use serde::Deserialize;
use std::collections::HashMap;

use crate::domain::foundation::ArtifactType;
use crate::domain::rebuild::{ArtifactRule, PolicyRules, RuleSet};

use super::error::ValidationError;

/// One rule's criteria as written in configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleConfig {
    /// Regex the artifact name must match
    pub name: Option<String>,

    /// Regex the branch must match
    pub branch: Option<String>,
}

/// handler -> artifact type -> rule
pub type RuleTable = HashMap<String, HashMap<String, RuleConfig>>;

/// Build policy configuration
///
/// ```toml
/// [policy.whitelist.dockerfilechangehandler.image]
/// name = "my-.*"
///
/// [policy.blacklist.dockerfilechangehandler.image]
/// branch = "rhel-6"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub whitelist: RuleTable,

    #[serde(default)]
    pub blacklist: RuleTable,
}

impl PolicyConfig {
    /// Compile the configured tables into policy rules
    pub fn to_rules(&self) -> Result<PolicyRules, ValidationError> {
        Ok(PolicyRules::new(
            compile_table("whitelist", &self.whitelist)?,
            compile_table("blacklist", &self.blacklist)?,
        ))
    }

    /// Validate policy configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_rules().map(|_| ())
    }
}

fn compile_table(list: &'static str, table: &RuleTable) -> Result<RuleSet, ValidationError> {
    let mut rules = RuleSet::new();
    for (handler, by_type) in table {
        for (artifact_type, rule) in by_type {
            let invalid = |reason: String| ValidationError::InvalidPolicyRule {
                list,
                handler: handler.clone(),
                artifact_type: artifact_type.clone(),
                reason,
            };
            let parsed = artifact_type
                .parse::<ArtifactType>()
                .map_err(|e| invalid(e.to_string()))?;
            let compiled = ArtifactRule::new(rule.name.as_deref(), rule.branch.as_deref())
                .map_err(|e| invalid(e.to_string()))?;
            rules.insert(handler, parsed, compiled);
        }
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(handler: &str, artifact_type: &str, rule: RuleConfig) -> RuleTable {
        let mut by_type = HashMap::new();
        by_type.insert(artifact_type.to_string(), rule);
        let mut table = HashMap::new();
        table.insert(handler.to_string(), by_type);
        table
    }

    #[test]
    fn test_empty_policy_compiles() {
        let rules = PolicyConfig::default().to_rules().unwrap();
        assert!(!rules
            .decide("DockerfileChangeHandler", ArtifactType::Image, "img", "main")
            .is_allowed());
    }

    #[test]
    fn test_whitelist_compiles_into_rules() {
        let config = PolicyConfig {
            whitelist: table(
                "dockerfilechangehandler",
                "image",
                RuleConfig {
                    name: Some("my-.*".to_string()),
                    branch: None,
                },
            ),
            blacklist: RuleTable::new(),
        };

        let rules = config.to_rules().unwrap();
        assert!(rules
            .decide("DockerfileChangeHandler", ArtifactType::Image, "my-image", "rhel-8")
            .is_allowed());
    }

    #[test]
    fn test_unknown_artifact_type_is_rejected() {
        let config = PolicyConfig {
            whitelist: table("dockerfilechangehandler", "container", RuleConfig::default()),
            blacklist: RuleTable::new(),
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("whitelist.dockerfilechangehandler.container"));
    }

    #[test]
    fn test_bad_regex_is_rejected() {
        let config = PolicyConfig {
            whitelist: RuleTable::new(),
            blacklist: table(
                "dockerfilechangehandler",
                "image",
                RuleConfig {
                    name: None,
                    branch: Some("rhel-[".to_string()),
                },
            ),
        };

        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidPolicyRule { list: "blacklist", .. })
        ));
    }

    #[test]
    fn test_deserializes_nested_tables() {
        let json = r#"{
            "whitelist": {"dockerfilechangehandler": {"image": {"name": "my-.*", "branch": "rhel-8"}}}
        }"#;
        let config: PolicyConfig = serde_json::from_str(json).unwrap();
        let rule = &config.whitelist["dockerfilechangehandler"]["image"];
        assert_eq!(rule.name.as_deref(), Some("my-.*"));
        assert!(config.blacklist.is_empty());
    }
}
