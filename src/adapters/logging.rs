//! Tracing-backed Notifier for wiring without a transport.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{Notifier, OutboundMessage};

/// Notifier that logs outbound messages instead of delivering them.
///
/// Used by the binary when no chat transport is attached; every message the
/// core would send is visible in the logs.
pub struct TracingNotifier;

impl TracingNotifier {
    /// Creates the notifier.
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn send(&self, to: UserId, message: OutboundMessage) -> Result<(), DomainError> {
        tracing::info!(
            user_id = %to,
            buttons = message.keyboard.iter().map(|row| row.len()).sum::<usize>(),
            "outbound: {}",
            message.text
        );
        Ok(())
    }
}
