//! EventSubscriber port - Interface for routing change events to handlers.
//!
//! This port defines how handlers register interest in change events
//! without knowing about the transport that delivered them.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::rebuild::RebuildEvent;

/// Handler for processing change events.
///
/// Implementations should be:
/// - **Selective** - `can_handle` is a pure predicate on the event kind
/// - **Isolated** - failures are logged inside `handle`, never returned,
///   so one bad event cannot stop processing of the next
/// - **Stateless** - safe to invoke concurrently for distinct events
///
/// # Example
///
/// ```ignore
/// struct RpmRebuilder { /* ... */ }
///
/// #[async_trait]
/// impl EventHandler for RpmRebuilder {
///     fn name(&self) -> &'static str {
///         "RpmRebuilder"
///     }
///
///     fn can_handle(&self, event: &RebuildEvent) -> bool {
///         matches!(event, RebuildEvent::GitRpmSpecChanged(_))
///     }
///
///     async fn handle(&self, event: RebuildEvent) -> Vec<RebuildEvent> {
///         // Trigger the build, log the outcome...
///         vec![]
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handler name for logging and policy lookup.
    ///
    /// Whitelist/blacklist rules are scoped by this name.
    fn name(&self) -> &'static str;

    /// Returns true if this handler wants the event.
    ///
    /// Dispatchers only call `handle` after this returns true.
    fn can_handle(&self, event: &RebuildEvent) -> bool;

    /// Process an event, returning any follow-on events to dispatch.
    async fn handle(&self, event: RebuildEvent) -> Vec<RebuildEvent>;
}

/// Port for registering handlers with a dispatcher.
pub trait EventSubscriber: Send + Sync {
    /// Register a handler. It will be offered every dispatched event.
    fn subscribe(&self, handler: Arc<dyn EventHandler>);

    /// Number of registered handlers.
    fn handler_count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that traits are object-safe
    #[allow(dead_code)]
    fn assert_handler_object_safe(_: &dyn EventHandler) {}

    #[allow(dead_code)]
    fn assert_subscriber_object_safe(_: &dyn EventSubscriber) {}

    // Compile-time check that traits are Send + Sync
    #[allow(dead_code)]
    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn event_handler_is_send_sync() {
        #[allow(dead_code)]
        fn check<T: EventHandler>() {
            assert_send_sync::<T>();
        }
    }

    #[test]
    fn event_subscriber_is_send_sync() {
        #[allow(dead_code)]
        fn check<T: EventSubscriber>() {
            assert_send_sync::<T>();
        }
    }
}
