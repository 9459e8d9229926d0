//! Recording subscriber - keeps every notification it receives

use std::sync::Mutex;

use crate::domain::{LoginEvent, Notification, TransactionEvent};
use crate::ports::Subscriber;

/// Subscriber that stores notifications in arrival order
#[derive(Default)]
pub struct RecordingSubscriber {
    received: Mutex<Vec<Notification>>,
}

impl RecordingSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far
    pub fn all(&self) -> Vec<Notification> {
        self.received.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn logins(&self) -> Vec<LoginEvent> {
        self.all()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Login(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    pub fn transactions(&self) -> Vec<TransactionEvent> {
        self.all()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Transaction(e) => Some(e),
                _ => None,
            })
            .collect()
    }
}

impl Subscriber for RecordingSubscriber {
    fn name(&self) -> &str {
        "recorder"
    }

    fn notify(&self, notification: &Notification) {
        self.received
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification.clone());
    }
}
