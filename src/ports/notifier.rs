//! Notifier port - the outbound half of the chat transport.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};

/// A single inline button offered with a message.
///
/// `payload` is the wire form of a [`crate::application::Command`]; the
/// transport echoes it back verbatim as a button-press event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub payload: String,
}

impl Button {
    /// Creates a button with the given label and command payload.
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// An outbound text message with an optional button keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub text: String,
    /// Rows of inline buttons; empty for a plain text message.
    pub keyboard: Vec<Vec<Button>>,
}

impl OutboundMessage {
    /// Creates a plain text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Vec::new(),
        }
    }

    /// Creates a message with a button keyboard.
    pub fn with_keyboard(text: impl Into<String>, keyboard: Vec<Vec<Button>>) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }
}

/// Outbound capability to deliver a message to a user.
///
/// Implemented by the chat transport adapter; the in-memory recording
/// adapter stands in for it in tests.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a message to the given user.
    async fn send(&self, to: UserId, message: OutboundMessage) -> Result<(), DomainError>;
}
