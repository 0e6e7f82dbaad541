//! Dialog state machine.
//!
//! Defines the profile-entry dialog states and valid transitions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;
use crate::domain::profile::ProfileField;

/// The state of a profile-entry dialog: which field the bot is waiting for.
///
/// The creation path walks every state in order:
/// `AwaitingNickname -> AwaitingGame -> AwaitingRank -> AwaitingDescription`.
/// An edit dialog enters at the edited field's state and finishes after a
/// single reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogState {
    /// Waiting for the user's in-game nickname.
    AwaitingNickname,

    /// Waiting for the game name.
    AwaitingGame,

    /// Waiting for the user's rank.
    AwaitingRank,

    /// Waiting for the free-text self description.
    AwaitingDescription,
}

impl DialogState {
    /// The profile field this state collects.
    pub fn field(&self) -> ProfileField {
        match self {
            DialogState::AwaitingNickname => ProfileField::Nickname,
            DialogState::AwaitingGame => ProfileField::Game,
            DialogState::AwaitingRank => ProfileField::Rank,
            DialogState::AwaitingDescription => ProfileField::Description,
        }
    }

    /// The state that follows on the creation path, if any.
    pub fn next(&self) -> Option<DialogState> {
        match self {
            DialogState::AwaitingNickname => Some(DialogState::AwaitingGame),
            DialogState::AwaitingGame => Some(DialogState::AwaitingRank),
            DialogState::AwaitingRank => Some(DialogState::AwaitingDescription),
            DialogState::AwaitingDescription => None,
        }
    }
}

impl StateMachine for DialogState {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.next() == Some(*target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        self.next().into_iter().collect()
    }
}
