//! Application handlers.
//!
//! Event handlers that orchestrate domain operations across ports.

mod dockerfile_change_handler;

pub use dockerfile_change_handler::{DockerfileChangeHandler, DOCKERFILE_CHANGE_HANDLER};
