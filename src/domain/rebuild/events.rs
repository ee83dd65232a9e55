//! Change notifications that can trigger rebuilds.
//!
//! Upstream sources publish one of these per git push they care about:
//! - `DockerfileChanged` - a container's Dockerfile repository moved
//! - `RpmSpecChanged` - an RPM spec file repository moved
//! - `ModuleMetadataChanged` - a module's metadata repository moved
//!
//! `RebuildEvent` is the tagged union handlers route on. Its JSON form is
//! internally tagged with a `kind` field, e.g.
//!
//! ```json
//! {"kind": "git_dockerfile_changed", "event_id": "msg-1",
//!  "container": "my-image", "branch": "rhel-8", "rev": "abc123"}
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{EventId, ValidationError};

// ════════════════════════════════════════════════════════════════════════════
// DockerfileChanged
// ════════════════════════════════════════════════════════════════════════════

/// Published when a commit lands on a container's Dockerfile repository.
///
/// Deserialization goes through [`DockerfileChanged::new`], so events read
/// off the wire are validated the same way as ones built in code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DockerfileChangedFields")]
pub struct DockerfileChanged {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// Container (image) repository name.
    pub container: String,

    /// Branch the commit landed on.
    pub branch: String,

    /// Commit hash to build from.
    pub rev: String,
}

impl DockerfileChanged {
    /// Creates a new event.
    ///
    /// Rejects empty fields. `container` and `rev` end up in the build
    /// source URL (`.../containers/{container}#{rev}`), so they may not
    /// contain whitespace, `/`, `#`, `?` or `%`, and `container` may not be
    /// `.` or `..`.
    pub fn new(
        event_id: EventId,
        container: impl Into<String>,
        branch: impl Into<String>,
        rev: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let container = url_segment("container", non_empty("container", container.into())?)?;
        let branch = non_empty("branch", branch.into())?;
        let rev = url_segment("rev", non_empty("rev", rev.into())?)?;
        Ok(Self {
            event_id,
            container,
            branch,
            rev,
        })
    }
}

#[derive(Deserialize)]
struct DockerfileChangedFields {
    event_id: EventId,
    container: String,
    branch: String,
    rev: String,
}

impl TryFrom<DockerfileChangedFields> for DockerfileChanged {
    type Error = ValidationError;

    fn try_from(fields: DockerfileChangedFields) -> Result<Self, Self::Error> {
        DockerfileChanged::new(fields.event_id, fields.container, fields.branch, fields.rev)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// RpmSpecChanged
// ════════════════════════════════════════════════════════════════════════════

/// Published when a commit lands on an RPM spec repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpmSpecChanged {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// Source package name.
    pub rpm: String,

    /// Branch the commit landed on.
    pub branch: String,

    /// Commit hash.
    pub rev: String,
}

// ════════════════════════════════════════════════════════════════════════════
// ModuleMetadataChanged
// ════════════════════════════════════════════════════════════════════════════

/// Published when a commit lands on a module metadata repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMetadataChanged {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// Module name.
    pub module: String,

    /// Branch (module stream) the commit landed on.
    pub branch: String,

    /// Commit hash.
    pub rev: String,
}

// ════════════════════════════════════════════════════════════════════════════
// RebuildEvent
// ════════════════════════════════════════════════════════════════════════════

/// Discriminant of a [`RebuildEvent`], used for routing and logging.
///
/// Serialized, displayed and stored in the dotted form only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "git.dockerfile.changed")]
    GitDockerfileChanged,
    #[serde(rename = "git.rpm_spec.changed")]
    GitRpmSpecChanged,
    #[serde(rename = "git.module_metadata.changed")]
    GitModuleMetadataChanged,
}

impl EventKind {
    /// Returns the dotted routing name (e.g. "git.dockerfile.changed").
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::GitDockerfileChanged => "git.dockerfile.changed",
            EventKind::GitRpmSpecChanged => "git.rpm_spec.changed",
            EventKind::GitModuleMetadataChanged => "git.module_metadata.changed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "git.dockerfile.changed" => Ok(EventKind::GitDockerfileChanged),
            "git.rpm_spec.changed" => Ok(EventKind::GitRpmSpecChanged),
            "git.module_metadata.changed" => Ok(EventKind::GitModuleMetadataChanged),
            other => Err(ValidationError::invalid_format(
                "event_kind",
                format!("unknown event kind '{}'", other),
            )),
        }
    }
}

/// Every change notification the worker understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RebuildEvent {
    GitDockerfileChanged(DockerfileChanged),
    GitRpmSpecChanged(RpmSpecChanged),
    GitModuleMetadataChanged(ModuleMetadataChanged),
}

impl RebuildEvent {
    /// Returns the discriminant of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            RebuildEvent::GitDockerfileChanged(_) => EventKind::GitDockerfileChanged,
            RebuildEvent::GitRpmSpecChanged(_) => EventKind::GitRpmSpecChanged,
            RebuildEvent::GitModuleMetadataChanged(_) => EventKind::GitModuleMetadataChanged,
        }
    }

    /// Returns the unique id of the wrapped event.
    pub fn event_id(&self) -> &EventId {
        match self {
            RebuildEvent::GitDockerfileChanged(e) => &e.event_id,
            RebuildEvent::GitRpmSpecChanged(e) => &e.event_id,
            RebuildEvent::GitModuleMetadataChanged(e) => &e.event_id,
        }
    }

    /// Returns the name of the repository the change landed in.
    pub fn artifact_name(&self) -> &str {
        match self {
            RebuildEvent::GitDockerfileChanged(e) => &e.container,
            RebuildEvent::GitRpmSpecChanged(e) => &e.rpm,
            RebuildEvent::GitModuleMetadataChanged(e) => &e.module,
        }
    }

    /// Returns the branch the change landed on.
    pub fn branch(&self) -> &str {
        match self {
            RebuildEvent::GitDockerfileChanged(e) => &e.branch,
            RebuildEvent::GitRpmSpecChanged(e) => &e.branch,
            RebuildEvent::GitModuleMetadataChanged(e) => &e.branch,
        }
    }
}

impl From<DockerfileChanged> for RebuildEvent {
    fn from(event: DockerfileChanged) -> Self {
        RebuildEvent::GitDockerfileChanged(event)
    }
}

impl From<RpmSpecChanged> for RebuildEvent {
    fn from(event: RpmSpecChanged) -> Self {
        RebuildEvent::GitRpmSpecChanged(event)
    }
}

impl From<ModuleMetadataChanged> for RebuildEvent {
    fn from(event: ModuleMetadataChanged) -> Self {
        RebuildEvent::GitModuleMetadataChanged(event)
    }
}

fn non_empty(field: &str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(value)
}

fn url_segment(field: &str, value: String) -> Result<String, ValidationError> {
    if value == "." || value == ".." {
        return Err(ValidationError::invalid_format(field, "path traversal"));
    }
    if let Some(c) = value
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || matches!(c, '/' | '#' | '?' | '%'))
    {
        return Err(ValidationError::invalid_format(
            field,
            format!("character {:?} is not allowed", c),
        ));
    }
    Ok(value)
}
