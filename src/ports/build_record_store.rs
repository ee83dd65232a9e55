//! BuildRecordStore port - persistence for triggered build bookkeeping.

use async_trait::async_trait;

use crate::domain::foundation::{ArtifactType, BuildTaskId, DomainError, EventId};
use crate::domain::rebuild::{BuildRecord, RebuildEvent};

/// Port for recording which events produced which build tasks.
///
/// # Example
///
/// ```ignore
/// let record = store
///     .record(&event, "my-image", ArtifactType::Image, BuildTaskId::new(42))
///     .await?;
/// ```
#[async_trait]
pub trait BuildRecordStore: Send + Sync {
    /// Store a record linking `event` to the build task it started.
    async fn record(
        &self,
        event: &RebuildEvent,
        artifact_name: &str,
        artifact_type: ArtifactType,
        build_task_id: BuildTaskId,
    ) -> Result<BuildRecord, DomainError>;

    /// All records produced by one event, oldest first.
    async fn find_by_event(&self, event_id: &EventId) -> Result<Vec<BuildRecord>, DomainError>;
}
