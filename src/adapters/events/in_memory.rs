//! In-memory event dispatcher.
//!
//! Offers every dispatched event to each registered handler whose
//! `can_handle` accepts it, in registration order. Follow-on events
//! returned by handlers are dispatched breadth-first by `dispatch_all`.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::domain::rebuild::{EventKind, RebuildEvent};
use crate::ports::{EventHandler, EventSubscriber};

/// Default limit on how many generations of follow-on events are chased.
pub const DEFAULT_MAX_CASCADE_DEPTH: usize = 8;

/// In-process event dispatcher.
///
/// Features:
/// - Sequential, deterministic delivery
/// - Event capture for assertions
/// - Bounded cascading of follow-on events
///
/// # Example
///
/// ```ignore
/// let dispatcher = InMemoryEventDispatcher::new();
/// dispatcher.subscribe(Arc::new(handler));
///
/// dispatcher.dispatch(event).await;
///
/// assert_eq!(dispatcher.event_count(), 1);
/// assert!(dispatcher.has_event_kind(EventKind::GitDockerfileChanged));
/// ```
pub struct InMemoryEventDispatcher {
    handlers: RwLock<Vec<Arc<dyn EventHandler>>>,
    dispatched: RwLock<Vec<RebuildEvent>>,
    max_cascade_depth: usize,
}

impl InMemoryEventDispatcher {
    /// Creates a new dispatcher with no handlers.
    pub fn new() -> Self {
        Self::with_max_cascade_depth(DEFAULT_MAX_CASCADE_DEPTH)
    }

    /// Creates a dispatcher that chases at most `depth` generations of
    /// follow-on events.
    pub fn with_max_cascade_depth(depth: usize) -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
            dispatched: RwLock::new(Vec::new()),
            max_cascade_depth: depth,
        }
    }

    /// Offers one event to every interested handler.
    ///
    /// Returns the follow-on events the handlers produced, in handler order.
    pub async fn dispatch(&self, event: RebuildEvent) -> Vec<RebuildEvent> {
        self.dispatched
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());

        // Clone handlers to release lock before await points
        let interested: Vec<Arc<dyn EventHandler>> = {
            let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
            handlers
                .iter()
                .filter(|h| h.can_handle(&event))
                .cloned()
                .collect()
        };

        if interested.is_empty() {
            debug!(
                event_id = %event.event_id(),
                kind = %event.kind(),
                "No handler for event"
            );
            return Vec::new();
        }

        let mut emitted = Vec::new();
        for handler in interested {
            debug!(
                event_id = %event.event_id(),
                handler = handler.name(),
                "Dispatching event"
            );
            emitted.extend(handler.handle(event.clone()).await);
        }
        emitted
    }

    /// Dispatches events and everything they cascade into.
    ///
    /// Returns the total number of events dispatched. Follow-on events past
    /// the configured depth are dropped with a warning.
    pub async fn dispatch_all(&self, events: Vec<RebuildEvent>) -> usize {
        let mut generation = events;
        let mut depth = 0;
        let mut total = 0;

        while !generation.is_empty() {
            if depth > self.max_cascade_depth {
                warn!(
                    dropped = generation.len(),
                    max_depth = self.max_cascade_depth,
                    "Cascade depth exceeded, dropping follow-on events"
                );
                break;
            }

            let mut next = Vec::new();
            for event in generation {
                next.extend(self.dispatch(event).await);
                total += 1;
            }
            generation = next;
            depth += 1;
        }

        total
    }

    // === Test Helpers ===

    /// Returns every event dispatched so far.
    pub fn dispatched_events(&self) -> Vec<RebuildEvent> {
        self.dispatched
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns count of dispatched events.
    pub fn event_count(&self) -> usize {
        self.dispatched
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Checks if an event of the given kind was dispatched.
    pub fn has_event_kind(&self, kind: EventKind) -> bool {
        self.dispatched
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|e| e.kind() == kind)
    }

    /// Clears captured events (for test isolation).
    pub fn clear(&self) {
        self.dispatched
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for InMemoryEventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSubscriber for InMemoryEventDispatcher {
    fn subscribe(&self, handler: Arc<dyn EventHandler>) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handler);
    }

    fn handler_count(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
