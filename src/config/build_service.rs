//! Build service configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Connection settings for the external container build service
#[derive(Debug, Clone, Deserialize)]
pub struct BuildServiceConfig {
    /// Base URL of the build service API
    #[serde(default)]
    pub base_url: String,

    /// Base URL the build service clones container repositories from
    #[serde(default = "default_git_base_url")]
    pub git_base_url: String,

    /// Appended to the branch name to form the build target
    #[serde(default = "default_target_suffix")]
    pub target_suffix: String,

    /// Request scratch builds that are never tagged
    #[serde(default)]
    pub scratch: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Bearer token presented to the build service
    pub auth_token: Option<SecretString>,
}

impl BuildServiceConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate build service configuration
    ///
    /// The API URL is only required when builds are actually submitted.
    pub fn validate(&self, dry_run: bool, production: bool) -> Result<(), ValidationError> {
        if self.git_base_url.is_empty() {
            return Err(ValidationError::MissingRequired(
                "REBUILDER__BUILD_SERVICE__GIT_BASE_URL",
            ));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if dry_run {
            return Ok(());
        }
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired(
                "REBUILDER__BUILD_SERVICE__BASE_URL",
            ));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBuildServiceUrl(self.base_url.clone()));
        }
        if production && !self.base_url.starts_with("https://") {
            return Err(ValidationError::BuildServiceMustBeHttps);
        }
        Ok(())
    }
}

impl Default for BuildServiceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            git_base_url: default_git_base_url(),
            target_suffix: default_target_suffix(),
            scratch: false,
            timeout_secs: default_timeout(),
            auth_token: None,
        }
    }
}

fn default_git_base_url() -> String {
    "git://pkgs.example.com".to_string()
}

fn default_target_suffix() -> String {
    "-containers-candidate".to_string()
}

fn default_timeout() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> BuildServiceConfig {
        BuildServiceConfig {
            base_url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_service_defaults() {
        let config = BuildServiceConfig::default();
        assert_eq!(config.target_suffix, "-containers-candidate");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn test_dry_run_does_not_need_base_url() {
        let config = BuildServiceConfig::default();
        assert!(config.validate(true, false).is_ok());
        assert!(matches!(
            config.validate(false, false),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let config = with_url("ftp://builds.example.com");
        assert!(matches!(
            config.validate(false, false),
            Err(ValidationError::InvalidBuildServiceUrl(_))
        ));
    }

    #[test]
    fn test_production_requires_https() {
        let config = with_url("http://builds.example.com");
        assert!(config.validate(false, false).is_ok());
        assert!(matches!(
            config.validate(false, true),
            Err(ValidationError::BuildServiceMustBeHttps)
        ));
        assert!(with_url("https://builds.example.com").validate(false, true).is_ok());
    }

    #[test]
    fn test_validation_invalid_timeout() {
        let config = BuildServiceConfig {
            timeout_secs: 0,
            ..with_url("https://builds.example.com")
        };
        assert!(config.validate(false, false).is_err());
    }

    #[test]
    fn test_token_deserializes_and_redacts() {
        let json = r#"{"base_url": "https://b", "auth_token": "s3cret"}"#;
        let config: BuildServiceConfig = serde_json::from_str(json).unwrap();
        assert!(config.auth_token.is_some());
        assert!(!format!("{:?}", config).contains("s3cret"));
    }
}
