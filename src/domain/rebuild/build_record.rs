//! BuildRecord - bookkeeping row linking an event to the build it started.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ArtifactType, BuildRecordId, BuildTaskId, EventId, Timestamp};

use super::{EventKind, RebuildEvent};

/// Which event produced which build task, and for what artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    pub id: BuildRecordId,
    pub event_id: EventId,
    pub event_kind: EventKind,
    pub artifact_name: String,
    pub artifact_type: ArtifactType,
    pub build_task_id: BuildTaskId,
    pub recorded_at: Timestamp,
}

impl BuildRecord {
    /// Creates a record for a build triggered by `event`.
    pub fn new(
        event: &RebuildEvent,
        artifact_name: impl Into<String>,
        artifact_type: ArtifactType,
        build_task_id: BuildTaskId,
    ) -> Self {
        Self {
            id: BuildRecordId::new(),
            event_id: event.event_id().clone(),
            event_kind: event.kind(),
            artifact_name: artifact_name.into(),
            artifact_type,
            build_task_id,
            recorded_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rebuild::DockerfileChanged;

    #[test]
    fn new_copies_event_identity() {
        let event: RebuildEvent =
            DockerfileChanged::new(EventId::from_string("msg-9"), "my-image", "rhel-8", "abc")
                .unwrap()
                .into();

        let record = BuildRecord::new(&event, "my-image", ArtifactType::Image, BuildTaskId::new(42));

        assert_eq!(record.event_id.as_str(), "msg-9");
        assert_eq!(record.event_kind, EventKind::GitDockerfileChanged);
        assert_eq!(record.artifact_name, "my-image");
        assert_eq!(record.artifact_type, ArtifactType::Image);
        assert_eq!(record.build_task_id.value(), 42);
    }

    #[test]
    fn json_uses_dotted_event_kind() {
        let event: RebuildEvent =
            DockerfileChanged::new(EventId::from_string("msg-9"), "my-image", "rhel-8", "abc")
                .unwrap()
                .into();
        let record = BuildRecord::new(&event, "my-image", ArtifactType::Image, BuildTaskId::new(42));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["event_kind"], "git.dockerfile.changed");
        assert_eq!(value["event_kind"], record.event_kind.as_str());
    }
}
