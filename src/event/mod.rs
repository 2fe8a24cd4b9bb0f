//! Event system for decoded mesh updates.
//!
//! The event system fans decoded frames out to any number of async
//! subscribers, so entity layers can react to the devices they own.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::broadcast;

use crate::error::{Error, Result};
use crate::protocol::FrameKind;
use crate::types::{DeviceAddress, StateUpdate};

/// Event types that can be dispatched.
#[derive(Debug, Clone)]
pub enum Event {
    /// A frame carried state.
    Update(StateUpdate),
    /// A frame was decoded but carried nothing actionable.
    Ignored {
        /// Command family the frame matched.
        kind: FrameKind,
        /// Raw frame bytes.
        frame: Bytes,
    },
    /// The frame source closed.
    Closed,
}

impl Event {
    /// Returns the device address the event relates to, if any.
    #[must_use]
    pub fn address(&self) -> Option<DeviceAddress> {
        match self {
            Self::Update(update) => update.address,
            Self::Ignored { kind, frame } => kind.address(frame),
            Self::Closed => None,
        }
    }
}

/// A subscription to events.
pub struct Subscription {
    receiver: broadcast::Receiver<Event>,
}

impl Subscription {
    /// Receives the next event.
    ///
    /// Returns `None` once the dispatcher is dropped.
    pub async fn recv(&mut self) -> Option<Event> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("subscriber lagged, skipped {skipped} events");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Receives the next event, treating a closed channel as an error.
    pub async fn next_event(&mut self) -> Result<Event> {
        self.recv().await.ok_or(Error::ChannelClosed)
    }
}

/// Subscription filter for specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Filter by device addresses.
    pub addresses: Option<Vec<DeviceAddress>>,
    /// Only pass [`Event::Update`].
    pub updates_only: bool,
}

impl EventFilter {
    /// Creates a filter for updates from one device.
    #[must_use]
    pub fn address(address: DeviceAddress) -> Self {
        Self::addresses(vec![address])
    }

    /// Creates a filter for updates from several devices.
    #[must_use]
    pub const fn addresses(addresses: Vec<DeviceAddress>) -> Self {
        Self {
            addresses: Some(addresses),
            updates_only: true,
        }
    }

    /// Creates a filter for all updates.
    #[must_use]
    pub const fn updates() -> Self {
        Self {
            addresses: None,
            updates_only: true,
        }
    }

    /// Checks if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        if self.updates_only && !matches!(event, Event::Update(_)) {
            return false;
        }

        if let Some(ref addresses) = self.addresses {
            match event.address() {
                Some(address) => addresses.contains(&address),
                None => false,
            }
        } else {
            true
        }
    }
}

struct EventDispatcherInner {
    sender: broadcast::Sender<Event>,
}

/// Dispatches events to subscribers.
#[derive(Clone)]
pub struct EventDispatcher {
    inner: Arc<EventDispatcherInner>,
}

impl EventDispatcher {
    /// Creates a new event dispatcher.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            inner: Arc::new(EventDispatcherInner { sender }),
        }
    }

    /// Dispatches an event to all subscribers.
    pub fn dispatch(&self, event: Event) {
        // No receivers is fine
        let _ = self.inner.sender.send(event);
    }

    /// Subscribes to all events.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.inner.sender.subscribe(),
        }
    }

    /// Returns the number of active subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.sender.receiver_count()
    }

    /// Waits for an event matching the filter with timeout.
    ///
    /// Returns `None` if the timeout expires or the channel is closed.
    pub async fn wait_for(&self, filter: EventFilter, timeout: Duration) -> Option<Event> {
        let mut subscription = self.subscribe();

        tokio::select! {
            biased;
            result = async {
                while let Some(event) = subscription.recv().await {
                    if filter.matches(&event) {
                        return Some(event);
                    }
                }
                None
            } => result,
            () = tokio::time::sleep(timeout) => None,
        }
    }
}
