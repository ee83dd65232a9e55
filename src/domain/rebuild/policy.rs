//! Whitelist/blacklist rules deciding which artifacts may be rebuilt.
//!
//! Rules are scoped by handler and artifact type. Each rule carries
//! optional regex criteria for the artifact name and the branch:
//!
//! ```toml
//! [policy.whitelist.dockerfilechangehandler.image]
//! name = "my-.*"
//! branch = "rhel-[0-9]+"
//! ```
//!
//! A build is allowed when a whitelist rule for the handler and artifact
//! type matches and no blacklist rule for the same pair does. Patterns are
//! anchored at the start of the value; a rule without criteria matches
//! every artifact of its type.

use regex::Regex;
use std::collections::HashMap;

use crate::domain::foundation::{ArtifactType, ValidationError};

/// Outcome of a policy lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    Allowed,
    Denied,
}

impl PolicyDecision {
    /// Returns true if the build may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, PolicyDecision::Allowed)
    }
}

impl From<bool> for PolicyDecision {
    fn from(allowed: bool) -> Self {
        if allowed {
            PolicyDecision::Allowed
        } else {
            PolicyDecision::Denied
        }
    }
}

/// Criteria one artifact must satisfy for a rule to match.
#[derive(Debug, Clone)]
pub struct ArtifactRule {
    name: Option<Regex>,
    branch: Option<Regex>,
}

impl ArtifactRule {
    /// Compiles a rule from optional name and branch patterns.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidFormat` if a pattern is not a valid regex.
    pub fn new(name: Option<&str>, branch: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: name.map(|p| compile("name", p)).transpose()?,
            branch: branch.map(|p| compile("branch", p)).transpose()?,
        })
    }

    /// A rule that matches every artifact of its type.
    pub fn any() -> Self {
        Self {
            name: None,
            branch: None,
        }
    }

    /// Returns true if every configured criterion matches.
    pub fn matches(&self, name: &str, branch: &str) -> bool {
        let name_ok = self.name.as_ref().map_or(true, |re| re.is_match(name));
        let branch_ok = self.branch.as_ref().map_or(true, |re| re.is_match(branch));
        name_ok && branch_ok
    }
}

fn compile(field: &str, pattern: &str) -> Result<Regex, ValidationError> {
    Regex::new(&format!("^(?:{})", pattern))
        .map_err(|e| ValidationError::invalid_format(field, e.to_string()))
}

/// Rules keyed by handler (case-insensitive) and artifact type.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: HashMap<String, HashMap<ArtifactType, ArtifactRule>>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the rule for a handler and artifact type.
    pub fn insert(&mut self, handler: &str, artifact_type: ArtifactType, rule: ArtifactRule) {
        self.rules
            .entry(handler.to_lowercase())
            .or_default()
            .insert(artifact_type, rule);
    }

    /// Builder-style variant of [`RuleSet::insert`].
    pub fn with_rule(mut self, handler: &str, artifact_type: ArtifactType, rule: ArtifactRule) -> Self {
        self.insert(handler, artifact_type, rule);
        self
    }

    /// Returns true if a rule exists for the pair and it matches.
    pub fn matches(
        &self,
        handler: &str,
        artifact_type: ArtifactType,
        name: &str,
        branch: &str,
    ) -> bool {
        self.rules
            .get(&handler.to_lowercase())
            .and_then(|by_type| by_type.get(&artifact_type))
            .is_some_and(|rule| rule.matches(name, branch))
    }

    /// Returns true if no rules are configured.
    pub fn is_empty(&self) -> bool {
        self.rules.values().all(|by_type| by_type.is_empty())
    }
}

/// Combined whitelist and blacklist.
#[derive(Debug, Clone, Default)]
pub struct PolicyRules {
    whitelist: RuleSet,
    blacklist: RuleSet,
}

impl PolicyRules {
    /// Creates rules from an explicit whitelist and blacklist.
    pub fn new(whitelist: RuleSet, blacklist: RuleSet) -> Self {
        Self {
            whitelist,
            blacklist,
        }
    }

    /// Decides whether `handler` may build the given artifact on `branch`.
    pub fn decide(
        &self,
        handler: &str,
        artifact_type: ArtifactType,
        name: &str,
        branch: &str,
    ) -> PolicyDecision {
        let whitelisted = self.whitelist.matches(handler, artifact_type, name, branch);
        let blacklisted = self.blacklist.matches(handler, artifact_type, name, branch);
        PolicyDecision::from(whitelisted && !blacklisted)
    }
}
