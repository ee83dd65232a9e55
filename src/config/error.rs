//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid log filter: {0}")]
    InvalidLogLevel(String),

    #[error("Cascade depth must be between 1 and 64")]
    InvalidCascadeDepth,

    #[error("Invalid build service URL: {0}")]
    InvalidBuildServiceUrl(String),

    #[error("Build service URL must use HTTPS in production")]
    BuildServiceMustBeHttps,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool max_connections must be at least 1")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (32)")]
    PoolSizeTooLarge,

    #[error("Invalid policy rule {list}.{handler}.{artifact_type}: {reason}")]
    InvalidPolicyRule {
        list: &'static str,
        handler: String,
        artifact_type: String,
        reason: String,
    },
}
