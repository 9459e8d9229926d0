//! Subscriber port - synchronous notification fan-out

use std::fmt;
use std::sync::Arc;

use crate::domain::Notification;

use super::Clock;

/// Receiver of login and transaction notifications
///
/// Called inline, before the triggering operation returns.
pub trait Subscriber: Send + Sync {
    /// Subscriber name (for diagnostics)
    fn name(&self) -> &str;

    /// Handle one notification
    fn notify(&self, notification: &Notification);
}

/// Per-entity list of subscribers plus the clock used to stamp events
#[derive(Clone)]
pub struct Notifier {
    clock: Arc<dyn Clock>,
    subscribers: Vec<Arc<dyn Subscriber>>,
}

impl Notifier {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            subscribers: Vec::new(),
        }
    }

    /// Register a subscriber; delivery follows registration order
    pub fn subscribe(&mut self, subscriber: Arc<dyn Subscriber>) {
        tracing::debug!(subscriber = subscriber.name(), "Subscriber registered");
        self.subscribers.push(subscriber);
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Deliver to every subscriber in order
    pub fn emit(&self, notification: Notification) {
        for subscriber in &self.subscribers {
            subscriber.notify(&notification);
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.subscribers.iter().map(|s| s.name()).collect();
        f.debug_struct("Notifier")
            .field("now", &self.clock.peek())
            .field("subscribers", &names)
            .finish()
    }
}
