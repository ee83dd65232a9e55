//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the rebuild domain.

mod artifact_type;
mod errors;
mod events;
mod ids;
mod timestamp;

pub use artifact_type::ArtifactType;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::EventId;
pub use ids::{BuildRecordId, BuildTaskId};
pub use timestamp::Timestamp;
