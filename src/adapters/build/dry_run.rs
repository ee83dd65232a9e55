//! Build trigger that only logs what it would have submitted.

use async_trait::async_trait;

use crate::domain::foundation::BuildTaskId;
use crate::ports::{BuildTrigger, BuildTriggerError};

/// Never contacts the build service; every request is reported as not scheduled.
#[derive(Debug, Default, Clone)]
pub struct DryRunBuildTrigger;

impl DryRunBuildTrigger {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BuildTrigger for DryRunBuildTrigger {
    async fn trigger_container_build(
        &self,
        container: &str,
        branch: &str,
        rev: &str,
    ) -> Result<Option<BuildTaskId>, BuildTriggerError> {
        tracing::info!(container, branch, rev, "Dry run: container build not submitted");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dry_run_never_schedules() {
        let trigger = DryRunBuildTrigger::new();
        let result = trigger
            .trigger_container_build("my-image", "rhel-8", "abc123")
            .await;
        assert_eq!(result.unwrap(), None);
    }
}
