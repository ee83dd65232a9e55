//! HTTP adapter for the container build service.
//!
//! Submits builds to `POST {base_url}/api/v1/container-builds`:
//!
//! ```json
//! {"source": "git://pkgs.example.com/containers/my-image#abc123",
//!  "target": "rhel-8-containers-candidate",
//!  "scratch": false,
//!  "git_branch": "rhel-8"}
//! ```
//!
//! and maps the answer onto [`BuildTriggerError`]:
//!
//! | Response                         | Result                      |
//! |----------------------------------|-----------------------------|
//! | 2xx `{"task_id": n}`             | `Ok(Some(n))`               |
//! | 2xx `{"task_id": null}` / 409    | `Ok(None)`                  |
//! | 2xx with empty body (202, 204)   | `Ok(None)`                  |
//! | 401 / 403                        | `Err(CredentialFailure)`    |
//! | other status                     | `Err(Rejected)`             |
//! | connect error / timeout          | `Err(Unavailable)`          |
//! | unparsable 2xx body              | `Err(InvalidResponse)`      |

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::BuildServiceConfig;
use crate::domain::foundation::BuildTaskId;
use crate::ports::{BuildTrigger, BuildTriggerError};

const CONTAINER_BUILDS_PATH: &str = "/api/v1/container-builds";

/// Body of a container build submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerBuildRequest {
    pub source: String,
    pub target: String,
    pub scratch: bool,
    pub git_branch: String,
}

#[derive(Debug, Deserialize)]
struct ContainerBuildResponse {
    #[serde(default)]
    task_id: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
    message: Option<String>,
}

/// Build trigger backed by the build service's REST API.
pub struct HttpBuildTrigger {
    endpoint: String,
    git_base_url: String,
    target_suffix: String,
    scratch: bool,
    auth_token: Option<SecretString>,
    http_client: reqwest::Client,
}

impl HttpBuildTrigger {
    /// Create a trigger from configuration. The request timeout is applied
    /// to every submission.
    pub fn new(config: &BuildServiceConfig) -> Result<Self, BuildTriggerError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| BuildTriggerError::Unavailable(e.to_string()))?;

        Ok(Self {
            endpoint: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                CONTAINER_BUILDS_PATH
            ),
            git_base_url: config.git_base_url.trim_end_matches('/').to_string(),
            target_suffix: config.target_suffix.clone(),
            scratch: config.scratch,
            auth_token: config.auth_token.clone(),
            http_client,
        })
    }

    /// URL builds are submitted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Assemble the submission body for a container at `rev` on `branch`.
    pub fn build_request(&self, container: &str, branch: &str, rev: &str) -> ContainerBuildRequest {
        ContainerBuildRequest {
            source: format!("{}/containers/{}#{}", self.git_base_url, container, rev),
            target: format!("{}{}", branch, self.target_suffix),
            scratch: self.scratch,
            git_branch: branch.to_string(),
        }
    }
}

/// Map a build service answer onto the trigger contract.
pub(crate) fn interpret_response(
    status: StatusCode,
    body: &str,
) -> Result<Option<BuildTaskId>, BuildTriggerError> {
    if status.is_success() {
        if body.trim().is_empty() {
            return Ok(None);
        }
        let parsed: ContainerBuildResponse = serde_json::from_str(body)
            .map_err(|e| BuildTriggerError::InvalidResponse(e.to_string()))?;
        return Ok(parsed.task_id.map(BuildTaskId::new));
    }

    if status == StatusCode::CONFLICT {
        return Ok(None);
    }

    let reason = error_reason(status, body);
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(BuildTriggerError::credential(status.as_u16(), reason));
    }

    Err(BuildTriggerError::Rejected {
        status: status.as_u16(),
        message: reason,
    })
}

fn error_reason(status: StatusCode, body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .detail
        .or(parsed.message)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        })
}

#[async_trait]
impl BuildTrigger for HttpBuildTrigger {
    async fn trigger_container_build(
        &self,
        container: &str,
        branch: &str,
        rev: &str,
    ) -> Result<Option<BuildTaskId>, BuildTriggerError> {
        let payload = self.build_request(container, branch, rev);

        let mut request = self.http_client.post(&self.endpoint).json(&payload);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| BuildTriggerError::Unavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BuildTriggerError::Unavailable(e.to_string()))?;

        tracing::debug!(
            status = status.as_u16(),
            source = %payload.source,
            target = %payload.target,
            "Build service responded"
        );

        interpret_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger() -> HttpBuildTrigger {
        let config = BuildServiceConfig {
            base_url: "https://builds.example.com/".to_string(),
            git_base_url: "git://pkgs.example.com".to_string(),
            ..Default::default()
        };
        HttpBuildTrigger::new(&config).unwrap()
    }

    #[test]
    fn endpoint_joins_base_url() {
        assert_eq!(
            trigger().endpoint(),
            "https://builds.example.com/api/v1/container-builds"
        );
    }

    #[test]
    fn request_names_source_and_target() {
        let request = trigger().build_request("my-image", "rhel-8", "abc123");

        assert_eq!(request.source, "git://pkgs.example.com/containers/my-image#abc123");
        assert_eq!(request.target, "rhel-8-containers-candidate");
        assert_eq!(request.git_branch, "rhel-8");
        assert!(!request.scratch);
    }

    #[test]
    fn request_serializes_expected_fields() {
        let json = serde_json::to_value(trigger().build_request("img", "main", "r1")).unwrap();
        assert_eq!(json["git_branch"], "main");
        assert_eq!(json["scratch"], false);
    }

    #[test]
    fn success_with_task_id() {
        let result = interpret_response(StatusCode::CREATED, r#"{"task_id": 42}"#);
        assert_eq!(result.unwrap(), Some(BuildTaskId::new(42)));
    }

    #[test]
    fn success_without_task_is_not_scheduled() {
        assert_eq!(
            interpret_response(StatusCode::OK, r#"{"task_id": null}"#).unwrap(),
            None
        );
        assert_eq!(interpret_response(StatusCode::OK, "{}").unwrap(), None);
    }

    #[test]
    fn empty_success_body_is_not_scheduled() {
        assert_eq!(interpret_response(StatusCode::NO_CONTENT, "").unwrap(), None);
        assert_eq!(interpret_response(StatusCode::ACCEPTED, "  \n").unwrap(), None);
    }

    #[test]
    fn conflict_is_not_scheduled() {
        let result = interpret_response(StatusCode::CONFLICT, r#"{"detail": "duplicate"}"#);
        assert_eq!(result.unwrap(), None);
    }

    #[test]
    fn unauthorized_is_credential_failure_with_detail() {
        let err = interpret_response(
            StatusCode::UNAUTHORIZED,
            r#"{"detail": "Kerberos ticket expired"}"#,
        )
        .unwrap_err();

        match err {
            BuildTriggerError::CredentialFailure { code, detail } => {
                assert_eq!(code, 401);
                assert_eq!(detail, "Kerberos ticket expired");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn forbidden_falls_back_to_message_then_reason() {
        let err = interpret_response(StatusCode::FORBIDDEN, r#"{"message": "no access"}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            BuildTriggerError::CredentialFailure { code: 403, ref detail } if detail == "no access"
        ));

        let err = interpret_response(StatusCode::FORBIDDEN, "<html>").unwrap_err();
        assert!(matches!(
            err,
            BuildTriggerError::CredentialFailure { ref detail, .. } if detail == "Forbidden"
        ));
    }

    #[test]
    fn server_error_is_rejected() {
        let err = interpret_response(StatusCode::INTERNAL_SERVER_ERROR, "").unwrap_err();
        assert!(matches!(
            err,
            BuildTriggerError::Rejected { status: 500, ref message } if message == "Internal Server Error"
        ));
    }

    #[test]
    fn garbage_success_body_is_invalid_response() {
        let err = interpret_response(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, BuildTriggerError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_service_is_unavailable() {
        let config = BuildServiceConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
            ..Default::default()
        };
        let trigger = HttpBuildTrigger::new(&config).unwrap();

        let err = trigger
            .trigger_container_build("img", "main", "r1")
            .await
            .unwrap_err();
        assert!(matches!(err, BuildTriggerError::Unavailable(_)));
    }
}
