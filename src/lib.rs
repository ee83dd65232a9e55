//! Dockerfile Rebuilder - rebuilds container images when their Dockerfile
//! repository changes.
//!
//! Change events are routed to handlers; the Dockerfile handler checks the
//! configured whitelist/blacklist, asks the build service for a container
//! build, and records which event produced which build task.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
