//! Build service adapters.

mod dry_run;
mod http_build_trigger;

pub use dry_run::DryRunBuildTrigger;
pub use http_build_trigger::{ContainerBuildRequest, HttpBuildTrigger};
