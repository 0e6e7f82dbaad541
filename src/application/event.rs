//! Inbound chat events and their classification.

use crate::domain::foundation::UserId;

/// Reply-keyboard escape text; cancels any dialog from any state.
pub const MAIN_MENU_TEXT: &str = "🏠 Main menu";

/// The user a chat event originates from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Opaque platform id.
    pub id: UserId,
    /// Platform contact handle, if the user has one.
    pub handle: Option<String>,
}

impl Actor {
    /// Creates an actor.
    pub fn new(id: UserId, handle: Option<&str>) -> Self {
        Self {
            id,
            handle: handle.map(str::to_string),
        }
    }
}

/// Slash commands the transport recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    /// `/start` - enter the main menu.
    Start,
    /// `/cancel` - abandon any active dialog.
    Cancel,
}

/// One inbound chat event, already classified by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// A slash command invocation.
    Command(BotCommand),
    /// A free-text message.
    Text(String),
    /// A button press carrying its opaque payload.
    ButtonPress(String),
}
