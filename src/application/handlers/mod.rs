//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations over
//! the storage and notifier ports.

pub mod browse;
pub mod conversation;
pub mod invite;
pub mod moderation;
pub mod profile;

pub use browse::{BrowseError, BrowseHandler, BrowseOutcome};
pub use conversation::{ConversationError, ConversationHandler, TextOutcome};
pub use invite::{InviteError, InviteHandler};
pub use moderation::{BanGate, ModerationError, ModerationHandler, ModerationPolicy};
pub use profile::{ProfileError, ProfileHandler};
