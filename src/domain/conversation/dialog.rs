//! Dialog value driving profile creation and field editing.
//!
//! One dialog exists per user while they are answering prompts. The dialog
//! is pure state: it validates replies and reports what should happen next,
//! while persistence stays with the caller.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::profile::ProfileField;

use super::{DialogState, ProfileDraft};

/// Whether the dialog is building a new profile or editing one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogMode {
    Creating,
    Editing,
}

/// Result of feeding one text reply into a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// The dialog advanced; prompt the user for the new state.
    Advanced(DialogState),

    /// Creation finished; the draft is complete and ready to persist.
    DraftReady(ProfileDraft),

    /// Editing finished; write this single field to the profile.
    FieldEdited(ProfileField, String),
}

/// A user's in-progress profile-entry dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialog {
    state: DialogState,
    mode: DialogMode,
    draft: ProfileDraft,
}

impl Dialog {
    /// Starts a creation dialog at the nickname prompt.
    pub fn creation() -> Self {
        Self {
            state: DialogState::AwaitingNickname,
            mode: DialogMode::Creating,
            draft: ProfileDraft::new(),
        }
    }

    /// Starts an edit dialog for a single field.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` for `ProfileField::Nickname`; the nickname is only
    ///   set on the creation path
    pub fn edit(field: ProfileField) -> Result<Self, DomainError> {
        let state = match field {
            ProfileField::Game => DialogState::AwaitingGame,
            ProfileField::Rank => DialogState::AwaitingRank,
            ProfileField::Description => DialogState::AwaitingDescription,
            ProfileField::Nickname => {
                return Err(DomainError::new(
                    ErrorCode::InvalidFormat,
                    "Nickname cannot be edited on its own",
                ));
            }
        };
        Ok(Self {
            state,
            mode: DialogMode::Editing,
            draft: ProfileDraft::new(),
        })
    }

    /// Returns the current state.
    pub fn state(&self) -> DialogState {
        self.state
    }

    /// Returns the dialog mode.
    pub fn mode(&self) -> DialogMode {
        self.mode
    }

    /// The prompt to show for the current state.
    pub fn prompt(&self) -> &'static str {
        prompt_for(self.state, self.mode)
    }

    /// Feeds one text reply into the dialog.
    ///
    /// On a validation error the dialog is unchanged and the caller
    /// re-prompts with [`Dialog::prompt`].
    ///
    /// # Errors
    ///
    /// - `EmptyField` for blank replies
    /// - `InvalidFormat` for command-like (`/`-prefixed) replies
    pub fn submit(&mut self, text: &str) -> Result<DialogOutcome, ValidationError> {
        let field = self.state.field();
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::empty_field(field.name()));
        }
        if text.starts_with('/') {
            return Err(ValidationError::invalid_format(
                field.name(),
                "commands are not accepted here",
            ));
        }

        match self.mode {
            DialogMode::Editing => Ok(DialogOutcome::FieldEdited(field, text.to_string())),
            DialogMode::Creating => {
                self.draft.set(field, text.to_string());
                match self.state.next() {
                    Some(next) => {
                        self.state = next;
                        Ok(DialogOutcome::Advanced(next))
                    }
                    None => Ok(DialogOutcome::DraftReady(self.draft.clone())),
                }
            }
        }
    }
}

fn prompt_for(state: DialogState, mode: DialogMode) -> &'static str {
    match (mode, state) {
        (DialogMode::Creating, DialogState::AwaitingNickname) => "Enter your in-game nickname:",
        (DialogMode::Creating, DialogState::AwaitingGame) => "Enter the name of the game:",
        (DialogMode::Creating, DialogState::AwaitingRank) => "Enter your rank in the game:",
        (DialogMode::Creating, DialogState::AwaitingDescription) => {
            "Write a short description of yourself and who you are looking for:"
        }
        (DialogMode::Editing, DialogState::AwaitingGame) => "Enter the new game:",
        (DialogMode::Editing, DialogState::AwaitingRank) => "Enter the new rank:",
        (DialogMode::Editing, _) => "Enter the new description:",
    }
}
