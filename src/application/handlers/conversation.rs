//! Conversation handlers: profile creation and field editing dialogs.

use std::sync::Arc;
use thiserror::Error;

use crate::application::event::Actor;
use crate::application::sessions::SessionMap;
use crate::domain::conversation::{Dialog, DialogOutcome};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::profile::ProfileField;
use crate::ports::{Notifier, OutboundMessage, ProfileStore};

/// Errors from the conversation handlers.
#[derive(Debug, Clone, Error)]
pub enum ConversationError {
    /// Creation requires that no profile exists yet.
    #[error("A profile already exists for this user")]
    ProfileAlreadyExists,

    /// Editing requires an existing profile.
    #[error("No profile exists for this user")]
    ProfileNotFound,

    /// Storage or domain failure.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// What the router should do after a text reply was processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOutcome {
    /// No dialog was active; nudge the user back to the main menu.
    NoDialog,

    /// The dialog consumed the reply (or re-prompted); nothing more to do.
    Continued,

    /// Creation finished and the profile was persisted; start browsing.
    ProfileCreated,

    /// A single field was written; return to the main menu.
    FieldUpdated(ProfileField),
}

/// Drives the per-user profile-entry dialog.
pub struct ConversationHandler<P, N>
where
    P: ProfileStore,
    N: Notifier,
{
    profiles: Arc<P>,
    notifier: Arc<N>,
    sessions: Arc<SessionMap>,
}

impl<P, N> ConversationHandler<P, N>
where
    P: ProfileStore,
    N: Notifier,
{
    /// Creates a new handler with the given dependencies.
    pub fn new(profiles: Arc<P>, notifier: Arc<N>, sessions: Arc<SessionMap>) -> Self {
        Self {
            profiles,
            notifier,
            sessions,
        }
    }

    /// Starts the creation dialog at the nickname prompt.
    ///
    /// Any active dialog is discarded first.
    pub async fn start_creation(&self, actor: &Actor) -> Result<(), ConversationError> {
        if self.profiles.exists(actor.id).await? {
            return Err(ConversationError::ProfileAlreadyExists);
        }

        let dialog = Dialog::creation();
        let prompt = dialog.prompt();
        self.sessions.start(actor.id, dialog).await;
        self.notifier
            .send(actor.id, OutboundMessage::text(prompt))
            .await?;
        tracing::debug!(user_id = %actor.id, "creation dialog started");
        Ok(())
    }

    /// Starts a single-field edit dialog.
    pub async fn start_edit(
        &self,
        actor: &Actor,
        field: ProfileField,
    ) -> Result<(), ConversationError> {
        if !self.profiles.exists(actor.id).await? {
            return Err(ConversationError::ProfileNotFound);
        }

        let dialog = Dialog::edit(field)?;
        let prompt = dialog.prompt();
        self.sessions.start(actor.id, dialog).await;
        self.notifier
            .send(actor.id, OutboundMessage::text(prompt))
            .await?;
        tracing::debug!(user_id = %actor.id, field = %field, "edit dialog started");
        Ok(())
    }

    /// Cancels any active dialog, discarding collected data.
    ///
    /// Returns true if a dialog was active.
    pub async fn cancel(&self, actor: &Actor) -> bool {
        self.sessions.cancel(actor.id).await
    }

    /// Feeds a free-text reply into the user's active dialog.
    pub async fn submit_text(
        &self,
        actor: &Actor,
        text: &str,
    ) -> Result<TextOutcome, ConversationError> {
        let Some(mut dialog) = self.sessions.take(actor.id).await else {
            return Ok(TextOutcome::NoDialog);
        };

        match dialog.submit(text) {
            Err(validation) => {
                // Validation retry: same state, re-prompt.
                let reply = format!("{}. {}", validation, dialog.prompt());
                self.sessions.start(actor.id, dialog).await;
                self.notifier
                    .send(actor.id, OutboundMessage::text(reply))
                    .await?;
                Ok(TextOutcome::Continued)
            }
            Ok(DialogOutcome::Advanced(_)) => {
                let prompt = dialog.prompt();
                self.sessions.start(actor.id, dialog).await;
                self.notifier
                    .send(actor.id, OutboundMessage::text(prompt))
                    .await?;
                Ok(TextOutcome::Continued)
            }
            Ok(DialogOutcome::DraftReady(draft)) => {
                let profile = draft.into_profile(actor.id, actor.handle.clone())?;
                self.profiles.upsert(&profile).await?;
                self.notifier
                    .send(
                        actor.id,
                        OutboundMessage::text("Profile created! Searching for allies..."),
                    )
                    .await?;
                tracing::info!(user_id = %actor.id, game = profile.game(), "profile created");
                Ok(TextOutcome::ProfileCreated)
            }
            Ok(DialogOutcome::FieldEdited(field, value)) => {
                let mut profile = self
                    .profiles
                    .find(actor.id)
                    .await?
                    .ok_or(ConversationError::ProfileNotFound)?;
                profile.set_field(field, value)?;
                self.profiles.upsert(&profile).await?;
                self.notifier
                    .send(
                        actor.id,
                        OutboundMessage::text(format!("✅ Your {} has been updated!", field)),
                    )
                    .await?;
                tracing::info!(user_id = %actor.id, field = %field, "profile field updated");
                Ok(TextOutcome::FieldUpdated(field))
            }
        }
    }
}

/// Maps a conversation error's domain code, used by the router's messages.
impl ConversationError {
    /// User-facing rejection text for this error.
    pub fn user_message(&self) -> String {
        match self {
            ConversationError::ProfileAlreadyExists => {
                "You already have a profile. Use \"Edit profile\" to change it.".to_string()
            }
            ConversationError::ProfileNotFound => "You don't have a profile yet!".to_string(),
            ConversationError::Domain(err) if err.code == ErrorCode::ValidationFailed => {
                err.message.clone()
            }
            ConversationError::Domain(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}
