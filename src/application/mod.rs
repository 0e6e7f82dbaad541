//! Application layer - event routing, dialog sessions, and handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The transport adapter turns raw chat updates into [`event::InboundEvent`]s
//! and feeds them to [`service::AlliesService`]; everything else lives here.

pub mod command;
pub mod event;
pub mod handlers;
pub(crate) mod render;
pub mod service;
pub mod sessions;

pub use command::{Command, CommandParseError};
pub use event::{Actor, BotCommand, InboundEvent, MAIN_MENU_TEXT};
pub use handlers::{
    BanGate, BrowseError, BrowseHandler, BrowseOutcome, ConversationError, ConversationHandler,
    InviteError, InviteHandler, ModerationError, ModerationHandler, ModerationPolicy, ProfileError,
    ProfileHandler, TextOutcome,
};
pub use service::AlliesService;
pub use sessions::{SessionMap, UserLocks};
