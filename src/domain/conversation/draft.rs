//! Draft of a profile under construction.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, UserId, ValidationError};
use crate::domain::profile::{Profile, ProfileField};

/// Field values collected so far by a creation dialog.
///
/// Owned by the dialog; discarded on cancel without touching storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    nickname: Option<String>,
    game: Option<String>,
    rank: Option<String>,
    description: Option<String>,
}

impl ProfileDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a collected field value.
    pub fn set(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::Nickname => self.nickname = Some(value),
            ProfileField::Game => self.game = Some(value),
            ProfileField::Rank => self.rank = Some(value),
            ProfileField::Description => self.description = Some(value),
        }
    }

    /// Returns a collected value, if present.
    pub fn get(&self, field: ProfileField) -> Option<&str> {
        match field {
            ProfileField::Nickname => self.nickname.as_deref(),
            ProfileField::Game => self.game.as_deref(),
            ProfileField::Rank => self.rank.as_deref(),
            ProfileField::Description => self.description.as_deref(),
        }
    }

    /// Builds the final profile once every field is collected.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if any field is still missing
    pub fn into_profile(
        self,
        user_id: UserId,
        handle: Option<String>,
    ) -> Result<Profile, DomainError> {
        let nickname = self.nickname.ok_or_else(|| missing(ProfileField::Nickname))?;
        let game = self.game.ok_or_else(|| missing(ProfileField::Game))?;
        let rank = self.rank.ok_or_else(|| missing(ProfileField::Rank))?;
        let description = self
            .description
            .ok_or_else(|| missing(ProfileField::Description))?;

        Profile::new(user_id, handle, nickname, game, rank, description)
    }
}

fn missing(field: ProfileField) -> DomainError {
    ValidationError::empty_field(field.name()).into()
}
