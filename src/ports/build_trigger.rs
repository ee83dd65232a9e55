//! BuildTrigger port - Interface to the external build service.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::BuildTaskId;

/// Errors raised while asking the build service for a container build.
#[derive(Debug, Clone, Error)]
pub enum BuildTriggerError {
    /// The build service's identity layer refused our credentials.
    ///
    /// `detail` is the human-readable reason reported by the service.
    #[error("credential failure ({code}): {detail}")]
    CredentialFailure { code: u16, detail: String },

    /// The build service could not be reached.
    #[error("build service unavailable: {0}")]
    Unavailable(String),

    /// The build service refused the request.
    #[error("build service rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The build service answered with something we could not parse.
    #[error("invalid build service response: {0}")]
    InvalidResponse(String),
}

impl BuildTriggerError {
    /// Creates a credential failure.
    pub fn credential(code: u16, detail: impl Into<String>) -> Self {
        BuildTriggerError::CredentialFailure {
            code,
            detail: detail.into(),
        }
    }

    /// Returns true if this is an authentication problem.
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, BuildTriggerError::CredentialFailure { .. })
    }
}

/// Port for scheduling container builds.
#[async_trait]
pub trait BuildTrigger: Send + Sync {
    /// Schedule a build of `container` from `rev` on `branch`.
    ///
    /// Returns `Ok(None)` when the service declined to schedule anything
    /// (for example because an identical build is already in flight).
    /// Any timeout or retry policy lives inside the implementation.
    async fn trigger_container_build(
        &self,
        container: &str,
        branch: &str,
        rev: &str,
    ) -> Result<Option<BuildTaskId>, BuildTriggerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn BuildTrigger) {}

    #[test]
    fn credential_failure_is_flagged() {
        let err = BuildTriggerError::credential(401, "ticket expired");
        assert!(err.is_credential_failure());
        assert_eq!(err.to_string(), "credential failure (401): ticket expired");
    }

    #[test]
    fn other_errors_are_not_credential_failures() {
        assert!(!BuildTriggerError::Unavailable("timeout".into()).is_credential_failure());
        assert!(!BuildTriggerError::Rejected {
            status: 500,
            message: "boom".into()
        }
        .is_credential_failure());
    }
}
