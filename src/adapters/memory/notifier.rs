//! Recording Notifier implementation for tests.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{Notifier, OutboundMessage};

/// Notifier that records every outbound message for assertions.
///
/// Stands in for the chat transport in unit and integration tests.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned.
pub struct RecordingNotifier {
    sent: RwLock<Vec<(UserId, OutboundMessage)>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self {
            sent: RwLock::new(Vec::new()),
        }
    }

    /// All messages sent so far, in delivery order.
    pub fn sent(&self) -> Vec<(UserId, OutboundMessage)> {
        self.sent
            .read()
            .expect("RecordingNotifier: lock poisoned")
            .clone()
    }

    /// Messages delivered to one user, in delivery order.
    pub fn sent_to(&self, user_id: UserId) -> Vec<OutboundMessage> {
        self.sent()
            .into_iter()
            .filter(|(to, _)| *to == user_id)
            .map(|(_, msg)| msg)
            .collect()
    }

    /// True if some message to `user_id` contains `needle` in its text.
    pub fn has_text_for(&self, user_id: UserId, needle: &str) -> bool {
        self.sent_to(user_id)
            .iter()
            .any(|msg| msg.text.contains(needle))
    }

    /// Clears recorded messages (for test isolation).
    pub fn clear(&self) {
        self.sent
            .write()
            .expect("RecordingNotifier: lock poisoned")
            .clear();
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, to: UserId, message: OutboundMessage) -> Result<(), DomainError> {
        self.sent
            .write()
            .expect("RecordingNotifier: lock poisoned")
            .push((to, message));
        Ok(())
    }
}
