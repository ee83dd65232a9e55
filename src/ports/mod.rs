//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Event Ports
//!
//! - `EventHandler` - Handler that processes incoming change events
//! - `EventSubscriber` - Registration of handlers with a dispatcher
//!
//! ## Collaborator Ports
//!
//! - `PolicyChecker` - Whitelist/blacklist gate
//! - `BuildTrigger` - External build service
//! - `BuildRecordStore` - Build bookkeeping persistence

mod build_record_store;
mod build_trigger;
mod event_subscriber;
mod policy_checker;

pub use build_record_store::BuildRecordStore;
pub use build_trigger::{BuildTrigger, BuildTriggerError};
pub use event_subscriber::{EventHandler, EventSubscriber};
pub use policy_checker::PolicyChecker;
