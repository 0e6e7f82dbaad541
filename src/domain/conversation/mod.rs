//! Conversation domain - the per-user profile-entry dialog.
//!
//! A dialog is transient state owned by the application session map; it is
//! created when the user starts creating or editing a profile and destroyed
//! on completion or cancel.

mod dialog;
mod draft;
mod state;

pub use dialog::{Dialog, DialogMode, DialogOutcome};
pub use draft::ProfileDraft;
pub use state::DialogState;
