//! PostgreSQL implementation of BuildRecordStore.
//!
//! Persists build records to the `build_records` table.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    ArtifactType, BuildRecordId, BuildTaskId, DomainError, ErrorCode, EventId, Timestamp,
};
use crate::domain::rebuild::{BuildRecord, EventKind, RebuildEvent};
use crate::ports::BuildRecordStore;

/// PostgreSQL implementation of BuildRecordStore.
#[derive(Clone)]
pub struct PostgresBuildRecordStore {
    pool: PgPool,
}

impl PostgresBuildRecordStore {
    /// Creates a new PostgresBuildRecordStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BuildRecordStore for PostgresBuildRecordStore {
    async fn record(
        &self,
        event: &RebuildEvent,
        artifact_name: &str,
        artifact_type: ArtifactType,
        build_task_id: BuildTaskId,
    ) -> Result<BuildRecord, DomainError> {
        let record = BuildRecord::new(event, artifact_name, artifact_type, build_task_id);
        let task_id = i64::try_from(record.build_task_id.value()).map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Build task id {} does not fit in BIGINT", record.build_task_id),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO build_records (
                id, event_id, event_kind, artifact_name, artifact_type, build_task_id, recorded_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.event_id.as_str())
        .bind(record.event_kind.as_str())
        .bind(&record.artifact_name)
        .bind(record.artifact_type.as_str())
        .bind(task_id)
        .bind(record.recorded_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert build record: {}", e),
            )
            .with_detail("event_id", record.event_id.as_str())
            .with_detail("build_task_id", record.build_task_id.to_string())
        })?;

        Ok(record)
    }

    async fn find_by_event(&self, event_id: &EventId) -> Result<Vec<BuildRecord>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, event_id, event_kind, artifact_name, artifact_type, build_task_id, recorded_at
            FROM build_records
            WHERE event_id = $1
            ORDER BY recorded_at ASC
            "#,
        )
        .bind(event_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch build records: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_record).collect()
    }
}

fn column<'r, T>(row: &'r sqlx::postgres::PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

fn row_to_record(row: sqlx::postgres::PgRow) -> Result<BuildRecord, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let event_id: String = column(&row, "event_id")?;
    let event_kind: String = column(&row, "event_kind")?;
    let artifact_name: String = column(&row, "artifact_name")?;
    let artifact_type: String = column(&row, "artifact_type")?;
    let build_task_id: i64 = column(&row, "build_task_id")?;
    let recorded_at: chrono::DateTime<chrono::Utc> = column(&row, "recorded_at")?;

    let event_kind: EventKind = event_kind.parse().map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid stored row: {}", e))
    })?;
    let artifact_type: ArtifactType = artifact_type.parse().map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid stored row: {}", e))
    })?;
    let build_task_id = u64::try_from(build_task_id).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid stored build task id: {}", build_task_id),
        )
    })?;

    Ok(BuildRecord {
        id: BuildRecordId::from_uuid(id),
        event_id: EventId::from_string(event_id),
        event_kind,
        artifact_name,
        artifact_type,
        build_task_id: BuildTaskId::new(build_task_id),
        recorded_at: Timestamp::from_datetime(recorded_at),
    })
}
