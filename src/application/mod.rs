//! Application layer - Event handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{DockerfileChangeHandler, DOCKERFILE_CHANGE_HANDLER};
