//! Rebuild module - change notifications, policy rules and build bookkeeping.

mod build_record;
mod events;
mod outcome;
mod policy;

pub use build_record::BuildRecord;
pub use events::{DockerfileChanged, EventKind, ModuleMetadataChanged, RebuildEvent, RpmSpecChanged};
pub use outcome::{FailureKind, RebuildOutcome};
pub use policy::{ArtifactRule, PolicyDecision, PolicyRules, RuleSet};
