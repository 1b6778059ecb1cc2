//! Event bus error primitives.

use crate::routing::SubscriptionId;
use std::fmt::{self, Display, Formatter};

/// Error emitted by subscription management.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventBusError {
    /// The subscription was never registered or was already removed.
    UnknownSubscription {
        /// Identifier supplied by the caller.
        subscription: SubscriptionId,
    },
}

impl EventBusError {
    /// Identifier associated with the failure.
    #[must_use]
    pub const fn subscription(&self) -> SubscriptionId {
        match self {
            Self::UnknownSubscription { subscription } => *subscription,
        }
    }
}

impl Display for EventBusError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("unknown event bus subscription")
    }
}

impl std::error::Error for EventBusError {}

/// Result wrapper for event bus operations.
pub type EventBusResult<T> = Result<T, EventBusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_bus_error_exposes_fields() {
        let err = EventBusError::UnknownSubscription {
            subscription: SubscriptionId(42),
        };

        assert_eq!(err.subscription(), SubscriptionId(42));
        assert_eq!(err.to_string(), "unknown event bus subscription");
    }
}
