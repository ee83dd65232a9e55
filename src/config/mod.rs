//! Worker configuration
//!
//! Configuration is layered: an optional `rebuilder.toml` in the working
//! directory, then environment variables with the `REBUILDER` prefix. Nested
//! values use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use dockerfile_rebuilder::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Dry run: {}", config.service.dry_run);
//! ```

mod build_service;
mod database;
mod error;
mod policy;
mod service;

pub use build_service::BuildServiceConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use policy::{PolicyConfig, RuleConfig, RuleTable};
pub use service::{Environment, ServiceConfig};

use serde::Deserialize;
use std::path::Path;

/// Root worker configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Environment, logging and dispatch settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Build service connection
    #[serde(default)]
    pub build_service: BuildServiceConfig,

    /// Whitelist/blacklist rules
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Build-record database; records stay in memory when absent
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from `rebuilder.toml` (if present) and environment
    ///
    /// # Environment Variable Format
    ///
    /// - `REBUILDER__SERVICE__DRY_RUN=true` -> `service.dry_run = true`
    /// - `REBUILDER__BUILD_SERVICE__BASE_URL=...` -> `build_service.base_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        Self::build(config::File::with_name("rebuilder").required(false))
    }

    /// Load configuration from an explicit file, still honouring environment
    /// overrides. The file format is taken from its extension.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::build(config::File::from(path.as_ref()))
    }

    fn build(
        file: config::File<config::FileSourceFile, config::FileFormat>,
    ) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::default()
                    .prefix("REBUILDER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.service.validate()?;
        self.build_service
            .validate(self.service.dry_run, self.service.is_production())?;
        self.policy.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.service.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ArtifactType;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const SAMPLE: &str = r#"
[service]
dry_run = true

[build_service]
base_url = "https://builds.example.com"
git_base_url = "git://pkgs.example.com"

[policy.whitelist.DockerfileChangeHandler.image]
name = "my-.*"

[policy.blacklist.DockerfileChangeHandler.image]
branch = "rhel-6"
"#;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn clear_env() {
        env::remove_var("REBUILDER__SERVICE__ENVIRONMENT");
        env::remove_var("REBUILDER__SERVICE__DRY_RUN");
        env::remove_var("REBUILDER__BUILD_SERVICE__BASE_URL");
    }

    #[test]
    fn test_defaults_without_sources() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load_from(write_config("").path()).unwrap();

        assert!(!config.service.dry_run);
        assert!(config.database.is_none());
        assert!(config.policy.whitelist.is_empty());
        assert_eq!(config.build_service.target_suffix, "-containers-candidate");
    }

    #[test]
    fn test_load_from_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let file = write_config(SAMPLE);
        let config = AppConfig::load_from(file.path()).unwrap();

        assert!(config.service.dry_run);
        assert_eq!(config.build_service.base_url, "https://builds.example.com");
        assert!(config.validate().is_ok());

        let rules = config.policy.to_rules().unwrap();
        assert!(rules
            .decide("DockerfileChangeHandler", ArtifactType::Image, "my-image", "rhel-8")
            .is_allowed());
        assert!(!rules
            .decide("DockerfileChangeHandler", ArtifactType::Image, "my-image", "rhel-6")
            .is_allowed());
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let file = write_config(SAMPLE);
        env::set_var("REBUILDER__SERVICE__DRY_RUN", "false");
        env::set_var("REBUILDER__BUILD_SERVICE__BASE_URL", "http://localhost:8080");
        let result = AppConfig::load_from(file.path());
        clear_env();

        let config = result.unwrap();
        assert!(!config.service.dry_run);
        assert_eq!(config.build_service.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let file = write_config(SAMPLE);
        env::set_var("REBUILDER__SERVICE__ENVIRONMENT", "production");
        let result = AppConfig::load_from(file.path());
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_validate_reports_bad_database() {
        let config = AppConfig {
            database: Some(DatabaseConfig {
                url: "mysql://localhost/rebuilder".to_string(),
                ..Default::default()
            }),
            service: ServiceConfig {
                dry_run: true,
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidDatabaseUrl)
        ));
    }

    #[test]
    fn test_validate_requires_build_service_url() {
        let config = AppConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }
}
