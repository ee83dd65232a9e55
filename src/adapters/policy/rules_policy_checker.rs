//! Policy checker backed by statically configured whitelist/blacklist rules.

use async_trait::async_trait;

use crate::config::{PolicyConfig, ValidationError};
use crate::domain::foundation::{ArtifactType, DomainError};
use crate::domain::rebuild::{PolicyDecision, PolicyRules};
use crate::ports::PolicyChecker;

/// Answers policy questions from rules compiled at startup. Never fails.
#[derive(Debug, Clone, Default)]
pub struct RulesPolicyChecker {
    rules: PolicyRules,
}

impl RulesPolicyChecker {
    pub fn new(rules: PolicyRules) -> Self {
        Self { rules }
    }

    /// Compile the configured tables.
    pub fn from_config(config: &PolicyConfig) -> Result<Self, ValidationError> {
        Ok(Self::new(config.to_rules()?))
    }
}

#[async_trait]
impl PolicyChecker for RulesPolicyChecker {
    async fn is_allowed(
        &self,
        handler: &str,
        artifact_type: ArtifactType,
        name: &str,
        branch: &str,
    ) -> Result<PolicyDecision, DomainError> {
        let decision = self.rules.decide(handler, artifact_type, name, branch);
        tracing::trace!(handler, %artifact_type, name, branch, ?decision, "Policy decision");
        Ok(decision)
    }
}
