//! Event bus routing helpers.

use crate::error::{EventBusError, EventBusResult};
use crate::payloads::{DEFAULT_REPLAY_CAPACITY, EventEnvelope, EventId, EventKind};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

type Handler<E> = Rc<dyn Fn(&EventEnvelope<E>)>;

struct BusState<E> {
    handlers: Vec<(SubscriptionId, Handler<E>)>,
    replay: VecDeque<EventEnvelope<E>>,
    replay_capacity: usize,
    next_id: EventId,
    next_subscription: u64,
}

/// Shared single-threaded event bus.
///
/// Clones share the same subscribers and replay ring. Handlers may publish or
/// (un)subscribe re-entrantly; the handler list is snapshotted before each
/// delivery so such changes take effect from the next publish.
pub struct EventBus<E> {
    state: Rc<RefCell<BusState<E>>>,
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        formatter
            .debug_struct("EventBus")
            .field("subscribers", &state.handlers.len())
            .field("buffered", &state.replay.len())
            .field("next_id", &state.next_id)
            .finish()
    }
}

impl<E: Clone + EventKind> EventBus<E> {
    /// Construct a bus with a custom replay capacity. A capacity of zero
    /// disables replay entirely.
    #[must_use]
    pub fn with_capacity(replay_capacity: usize) -> Self {
        Self {
            state: Rc::new(RefCell::new(BusState {
                handlers: Vec::new(),
                replay: VecDeque::with_capacity(replay_capacity),
                replay_capacity,
                next_id: 1,
                next_subscription: 1,
            })),
        }
    }

    /// Construct a bus with the default replay capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_REPLAY_CAPACITY)
    }

    /// Publish an event to every current subscriber and return its id.
    pub fn publish(&self, event: E) -> EventId {
        let (envelope, handlers) = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id = state.next_id.saturating_add(1);
            let envelope = EventEnvelope { id, event };
            if state.replay_capacity > 0 {
                if state.replay.len() == state.replay_capacity {
                    let _ = state.replay.pop_front();
                }
                state.replay.push_back(envelope.clone());
            }
            let handlers: Vec<Handler<E>> = state
                .handlers
                .iter()
                .map(|(_, handler)| Rc::clone(handler))
                .collect();
            (envelope, handlers)
        };

        trace!(
            kind = envelope.kind(),
            id = envelope.id,
            subscribers = handlers.len(),
            "event published"
        );
        for handler in handlers {
            handler(&envelope);
        }
        envelope.id
    }

    /// Register a handler. When `since` is provided, buffered events with a
    /// greater id are delivered to the handler before this call returns.
    pub fn subscribe<F>(&self, since: Option<EventId>, handler: F) -> SubscriptionId
    where
        F: Fn(&EventEnvelope<E>) + 'static,
    {
        let handler: Handler<E> = Rc::new(handler);
        let (subscription, backlog) = {
            let mut state = self.state.borrow_mut();
            let subscription = SubscriptionId(state.next_subscription);
            state.next_subscription = state.next_subscription.saturating_add(1);
            state.handlers.push((subscription, Rc::clone(&handler)));
            let backlog: Vec<EventEnvelope<E>> = since.map_or_else(Vec::new, |since| {
                state
                    .replay
                    .iter()
                    .filter(|envelope| envelope.id > since)
                    .cloned()
                    .collect()
            });
            (subscription, backlog)
        };

        for envelope in &backlog {
            handler(envelope);
        }
        subscription
    }

    /// Remove a previously registered handler.
    ///
    /// # Errors
    ///
    /// Returns [`EventBusError::UnknownSubscription`] when the id is not
    /// registered on this bus.
    pub fn unsubscribe(&self, subscription: SubscriptionId) -> EventBusResult<()> {
        let mut state = self.state.borrow_mut();
        let before = state.handlers.len();
        state.handlers.retain(|(id, _)| *id != subscription);
        if state.handlers.len() == before {
            return Err(EventBusError::UnknownSubscription { subscription });
        }
        Ok(())
    }

    /// Returns the id of the most recently buffered event, if any.
    #[must_use]
    pub fn last_event_id(&self) -> Option<EventId> {
        self.state.borrow().replay.back().map(|envelope| envelope.id)
    }

    /// Number of handlers currently registered.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().handlers.len()
    }
}

impl<E: Clone + EventKind> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}
