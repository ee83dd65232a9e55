//! PolicyChecker port - allow/deny gate in front of every build.

use async_trait::async_trait;

use crate::domain::foundation::{ArtifactType, DomainError};
use crate::domain::rebuild::PolicyDecision;

/// Port for checking whether a handler may build an artifact.
///
/// Implementations may consult static configuration or a remote service.
/// A lookup failure is an `Err`, distinct from a `Denied` decision.
#[async_trait]
pub trait PolicyChecker: Send + Sync {
    /// Decide whether `handler` may build `name` from `branch`.
    async fn is_allowed(
        &self,
        handler: &str,
        artifact_type: ArtifactType,
        name: &str,
        branch: &str,
    ) -> Result<PolicyDecision, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn PolicyChecker) {}
}
