//! Worker service configuration

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::error::ValidationError;

/// Worker-wide settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Environment name
    #[serde(default = "default_environment")]
    pub environment: Environment,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log what would be built instead of calling the build service
    #[serde(default)]
    pub dry_run: bool,

    /// How many generations of follow-on events the dispatcher chases
    #[serde(default = "default_max_cascade_depth")]
    pub max_cascade_depth: usize,
}

/// Application environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServiceConfig {
    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Build the tracing filter for `log_level`
    pub fn env_filter(&self) -> Result<EnvFilter, ValidationError> {
        EnvFilter::try_new(&self.log_level)
            .map_err(|e| ValidationError::InvalidLogLevel(e.to_string()))
    }

    /// Validate service configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.env_filter()?;
        if self.max_cascade_depth == 0 || self.max_cascade_depth > 64 {
            return Err(ValidationError::InvalidCascadeDepth);
        }
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
            dry_run: false,
            max_cascade_depth: default_max_cascade_depth(),
        }
    }
}

fn default_environment() -> Environment {
    Environment::Development
}

fn default_log_level() -> String {
    "info,dockerfile_rebuilder=debug,sqlx=warn".to_string()
}

fn default_max_cascade_depth() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_config_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert!(!config.dry_run);
        assert_eq!(config.max_cascade_depth, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let mut config = ServiceConfig::default();
        assert!(!config.is_production());

        config.environment = Environment::Production;
        assert!(config.is_production());
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let config = ServiceConfig {
            log_level: "info,dockerfile_rebuilder=loud".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_validation_cascade_depth_bounds() {
        let zero = ServiceConfig {
            max_cascade_depth: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_err());

        let deep = ServiceConfig {
            max_cascade_depth: 65,
            ..Default::default()
        };
        assert!(deep.validate().is_err());
    }
}
