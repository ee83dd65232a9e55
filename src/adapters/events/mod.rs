//! Event dispatch adapters.
//!
//! - `InMemoryEventDispatcher` - Sequential, in-process routing of change
//!   events to the handlers that accept them

mod in_memory;

pub use in_memory::{InMemoryEventDispatcher, DEFAULT_MAX_CASCADE_DEPTH};
