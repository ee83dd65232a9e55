//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Task reference handed back by the build service for a scheduled build.
///
/// Opaque to the rest of the system: it is only recorded and logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildTaskId(u64);

impl BuildTaskId {
    /// Wraps a raw task number returned by the build service.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw task number.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for BuildTaskId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for BuildTaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BuildTaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Unique identifier for a stored build record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildRecordId(Uuid);

impl BuildRecordId {
    /// Creates a new random BuildRecordId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a BuildRecordId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BuildRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BuildRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BuildRecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}
