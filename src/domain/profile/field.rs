//! Editable profile field enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single text field of a [`super::Profile`].
///
/// Used by the edit dialog to address one field at a time and by
/// validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Nickname,
    Game,
    Rank,
    Description,
}

impl ProfileField {
    /// Lowercase field name for validation messages.
    pub fn name(&self) -> &'static str {
        match self {
            ProfileField::Nickname => "nickname",
            ProfileField::Game => "game",
            ProfileField::Rank => "rank",
            ProfileField::Description => "description",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
