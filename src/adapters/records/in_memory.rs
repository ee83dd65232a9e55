//! In-memory build record store.
//!
//! Used when no database is configured, and in tests.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{ArtifactType, BuildTaskId, DomainError, EventId};
use crate::domain::rebuild::{BuildRecord, RebuildEvent};
use crate::ports::BuildRecordStore;

/// Keeps build records in insertion order for the life of the process.
#[derive(Debug, Default)]
pub struct InMemoryBuildRecordStore {
    records: RwLock<Vec<BuildRecord>>,
}

impl InMemoryBuildRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record, oldest first.
    pub async fn all(&self) -> Vec<BuildRecord> {
        self.records.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl BuildRecordStore for InMemoryBuildRecordStore {
    async fn record(
        &self,
        event: &RebuildEvent,
        artifact_name: &str,
        artifact_type: ArtifactType,
        build_task_id: BuildTaskId,
    ) -> Result<BuildRecord, DomainError> {
        let record = BuildRecord::new(event, artifact_name, artifact_type, build_task_id);
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_by_event(&self, event_id: &EventId) -> Result<Vec<BuildRecord>, DomainError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| &r.event_id == event_id)
            .cloned()
            .collect())
    }
}
