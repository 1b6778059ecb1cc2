//! Theme and rotation notices handed to widgets outside the settings core.

use dashboard_events::{EventBus, EventBusResult, EventEnvelope, EventId, SubscriptionId};
use dashboard_settings::SettingsNotice;

/// Cloneable view of the store's notice bus.
///
/// The slideshow timer listens for `RotationSpeedChanged`, themed widgets for
/// `ThemeChanged`. A widget mounted late passes the last id it saw (or `0`)
/// to replay the buffered notices before live delivery starts.
#[derive(Debug, Clone)]
pub struct NoticeFeed {
    bus: EventBus<SettingsNotice>,
}

impl NoticeFeed {
    /// Wrap a store's notice bus.
    #[must_use]
    pub const fn new(bus: EventBus<SettingsNotice>) -> Self {
        Self { bus }
    }

    /// Deliver every notice newer than `since`, then every future notice.
    pub fn subscribe<F>(&self, since: Option<EventId>, handler: F) -> SubscriptionId
    where
        F: Fn(EventId, &SettingsNotice) + 'static,
    {
        self.bus
            .subscribe(since, move |envelope: &EventEnvelope<SettingsNotice>| {
                handler(envelope.id, &envelope.event);
            })
    }

    /// Stop delivering to `subscription`.
    ///
    /// # Errors
    ///
    /// Returns an error when `subscription` is not registered.
    pub fn unsubscribe(&self, subscription: SubscriptionId) -> EventBusResult<()> {
        self.bus.unsubscribe(subscription)
    }

    /// Id of the newest notice, if any was published.
    #[must_use]
    pub fn last_id(&self) -> Option<EventId> {
        self.bus.last_event_id()
    }

    /// The underlying bus.
    #[must_use]
    pub const fn bus(&self) -> &EventBus<SettingsNotice> {
        &self.bus
    }
}
