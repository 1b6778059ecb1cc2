//! Event envelope and discriminator primitives.

use serde::Serialize;

/// Identifier assigned to each event published on a bus.
pub type EventId = u64;

/// Default number of envelopes retained for replay.
pub const DEFAULT_REPLAY_CAPACITY: usize = 32;

/// Machine-friendly discriminator for payloads carried on a bus.
pub trait EventKind {
    /// Stable name used in logs and filters.
    fn kind(&self) -> &'static str;
}

/// Metadata wrapper around a published payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventEnvelope<E> {
    /// Sequential identifier, starting at 1 for each bus.
    pub id: EventId,
    /// Event payload.
    pub event: E,
}

impl<E: EventKind> EventEnvelope<E> {
    /// Discriminator of the wrapped payload.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.event.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    struct Ping;

    impl EventKind for Ping {
        fn kind(&self) -> &'static str {
            "ping"
        }
    }

    #[test]
    fn envelope_exposes_payload_kind() {
        let envelope = EventEnvelope { id: 7, event: Ping };
        assert_eq!(envelope.kind(), "ping");
    }

    #[test]
    fn envelope_serializes_id_and_payload() {
        let envelope = EventEnvelope {
            id: 3,
            event: "theme".to_string(),
        };
        let json = serde_json::to_value(&envelope).expect("serialize envelope");
        assert_eq!(json["id"], 3);
        assert_eq!(json["event"], "theme");
    }
}
