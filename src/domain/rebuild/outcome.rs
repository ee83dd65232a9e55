//! Terminal outcome of handling one change event.

use std::fmt;

use crate::domain::foundation::BuildTaskId;

/// Why a rebuild attempt ended in failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The build service rejected our credentials.
    Credential,
    /// Policy lookup or build triggering failed for any other reason.
    Generic,
    /// The build was scheduled but the record could not be stored.
    Record,
}

/// What happened to a single change event.
///
/// Never crosses the dispatcher boundary as an error: handlers log it and
/// return normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
    /// The whitelist/blacklist did not allow this artifact and branch.
    SkippedByPolicy,
    /// A build was scheduled and recorded.
    Recorded(BuildTaskId),
    /// The build service accepted the request but scheduled nothing.
    NotScheduled,
    /// Something went wrong; already logged.
    Failed(FailureKind),
}

impl RebuildOutcome {
    /// Returns the scheduled task, if any.
    pub fn build_task_id(&self) -> Option<BuildTaskId> {
        match self {
            RebuildOutcome::Recorded(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns true for every failed variant.
    pub fn is_failure(&self) -> bool {
        matches!(self, RebuildOutcome::Failed(_))
    }
}

impl fmt::Display for RebuildOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebuildOutcome::SkippedByPolicy => write!(f, "skipped_by_policy"),
            RebuildOutcome::Recorded(id) => write!(f, "recorded({})", id),
            RebuildOutcome::NotScheduled => write!(f, "not_scheduled"),
            RebuildOutcome::Failed(kind) => write!(f, "failed({:?})", kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_recorded_carries_task_id() {
        assert_eq!(
            RebuildOutcome::Recorded(BuildTaskId::new(5)).build_task_id(),
            Some(BuildTaskId::new(5))
        );
        assert_eq!(RebuildOutcome::NotScheduled.build_task_id(), None);
        assert_eq!(RebuildOutcome::SkippedByPolicy.build_task_id(), None);
    }

    #[test]
    fn failures_are_flagged() {
        assert!(RebuildOutcome::Failed(FailureKind::Credential).is_failure());
        assert!(!RebuildOutcome::SkippedByPolicy.is_failure());
    }

    #[test]
    fn displays_compactly() {
        assert_eq!(RebuildOutcome::Recorded(BuildTaskId::new(42)).to_string(), "recorded(42)");
        assert_eq!(
            RebuildOutcome::Failed(FailureKind::Generic).to_string(),
            "failed(Generic)"
        );
    }
}
