//! DockerfileChangeHandler - Rebuilds container images when their Dockerfile changes.
//!
//! Listens for `git.dockerfile.changed` events and:
//! 1. Asks the policy checker whether the image/branch may be rebuilt
//! 2. Asks the build service to build the image from the pushed revision
//! 3. Records the returned build task against the event
//!
//! Every failure is logged and swallowed: the dispatcher always sees an
//! empty list of follow-on events, so one bad event never blocks the rest.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::domain::foundation::{ArtifactType, BuildTaskId};
use crate::domain::rebuild::{DockerfileChanged, FailureKind, RebuildEvent, RebuildOutcome};
use crate::ports::{BuildRecordStore, BuildTrigger, BuildTriggerError, EventHandler, PolicyChecker};

/// Name used for logging and for scoping whitelist/blacklist rules.
pub const DOCKERFILE_CHANGE_HANDLER: &str = "DockerfileChangeHandler";

/// Handles DockerfileChanged events by triggering container rebuilds.
pub struct DockerfileChangeHandler {
    policy: Arc<dyn PolicyChecker>,
    builds: Arc<dyn BuildTrigger>,
    records: Arc<dyn BuildRecordStore>,
}

impl DockerfileChangeHandler {
    /// Creates a new DockerfileChangeHandler.
    pub fn new(
        policy: Arc<dyn PolicyChecker>,
        builds: Arc<dyn BuildTrigger>,
        records: Arc<dyn BuildRecordStore>,
    ) -> Self {
        Self {
            policy,
            builds,
            records,
        }
    }

    /// Runs one rebuild attempt and reports how it ended.
    ///
    /// Never fails: every error is logged here and folded into
    /// `RebuildOutcome::Failed`.
    pub async fn rebuild(&self, change: &DockerfileChanged) -> RebuildOutcome {
        let container = change.container.as_str();
        let branch = change.branch.as_str();

        info!(container, "Start to rebuild docker image");

        let decision = match self
            .policy
            .is_allowed(DOCKERFILE_CHANGE_HANDLER, ArtifactType::Image, container, branch)
            .await
        {
            Ok(decision) => decision,
            Err(e) => {
                error!(
                    container,
                    error = %e,
                    "Could not create task to build docker image {}", container
                );
                return RebuildOutcome::Failed(FailureKind::Generic);
            }
        };

        if !decision.is_allowed() {
            info!(
                container,
                branch,
                "Skip rebuild of {}:{} as it's not allowed by configured whitelist/blacklist",
                container,
                branch
            );
            return RebuildOutcome::SkippedByPolicy;
        }

        let task_id = match self
            .builds
            .trigger_container_build(container, branch, &change.rev)
            .await
        {
            Ok(Some(task_id)) => task_id,
            Ok(None) => {
                info!(container, branch, rev = %change.rev, "Build service did not schedule a build");
                return RebuildOutcome::NotScheduled;
            }
            Err(BuildTriggerError::CredentialFailure { code, detail }) => {
                error!(
                    container,
                    code,
                    detail = %detail,
                    "Failed to authenticate with build service. {}", detail
                );
                return RebuildOutcome::Failed(FailureKind::Credential);
            }
            Err(e) => {
                error!(
                    container,
                    error = %e,
                    "Could not create task to build docker image {}", container
                );
                return RebuildOutcome::Failed(FailureKind::Generic);
            }
        };

        self.record(change, task_id).await
    }

    async fn record(&self, change: &DockerfileChanged, task_id: BuildTaskId) -> RebuildOutcome {
        let event = RebuildEvent::from(change.clone());

        match self
            .records
            .record(&event, &change.container, ArtifactType::Image, task_id)
            .await
        {
            Ok(record) => {
                info!(
                    container = %change.container,
                    build_task_id = %task_id,
                    record_id = %record.id,
                    "Recorded container build"
                );
                RebuildOutcome::Recorded(task_id)
            }
            Err(e) => {
                error!(
                    container = %change.container,
                    build_task_id = %task_id,
                    error = %e,
                    "Build was scheduled but could not be recorded"
                );
                RebuildOutcome::Failed(FailureKind::Record)
            }
        }
    }
}

#[async_trait]
impl EventHandler for DockerfileChangeHandler {
    fn name(&self) -> &'static str {
        DOCKERFILE_CHANGE_HANDLER
    }

    fn can_handle(&self, event: &RebuildEvent) -> bool {
        matches!(event, RebuildEvent::GitDockerfileChanged(_))
    }

    async fn handle(&self, event: RebuildEvent) -> Vec<RebuildEvent> {
        let change = match event {
            RebuildEvent::GitDockerfileChanged(change) => change,
            other => {
                debug!(kind = %other.kind(), "Event is not a Dockerfile change, ignoring");
                return Vec::new();
            }
        };

        let outcome = self.rebuild(&change).await;
        debug!(
            event_id = %change.event_id,
            outcome = %outcome,
            "Finished handling Dockerfile change"
        );

        Vec::new()
    }
}
