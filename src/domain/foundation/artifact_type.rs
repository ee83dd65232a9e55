//! ArtifactType enum naming the kinds of buildable units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Kind of artifact a build produces.
///
/// The lowercase string form is what policy rules are keyed on and what
/// gets persisted alongside build records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactType {
    Image,
    Module,
    Rpm,
}

impl ArtifactType {
    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactType::Image => "image",
            ArtifactType::Module => "module",
            ArtifactType::Rpm => "rpm",
        }
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(ArtifactType::Image),
            "module" => Ok(ArtifactType::Module),
            "rpm" => Ok(ArtifactType::Rpm),
            other => Err(ValidationError::invalid_format(
                "artifact_type",
                format!("unknown artifact type '{}'", other),
            )),
        }
    }
}
