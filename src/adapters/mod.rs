//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - In-process event dispatch
//! - `policy` - Whitelist/blacklist policy checking
//! - `build` - Build service clients (HTTP, dry run)
//! - `records` - Build record persistence (in-memory, PostgreSQL)

pub mod build;
pub mod events;
pub mod policy;
pub mod records;

pub use build::{DryRunBuildTrigger, HttpBuildTrigger};
pub use events::InMemoryEventDispatcher;
pub use policy::RulesPolicyChecker;
pub use records::{InMemoryBuildRecordStore, PostgresBuildRecordStore};
