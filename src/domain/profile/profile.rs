//! Profile aggregate entity.
//!
//! A profile is a user's game card plus their searching and ban status.
//! Profiles are created by the profile-entry dialog, edited one field at a
//! time, and suspended by moderation. They are never hard-deleted.

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId, ValidationError};
use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::ProfileField;

/// Profile aggregate - one user's game card and matchmaking status.
///
/// # Invariants
///
/// - `nickname`, `game`, `rank`, `description` are non-empty after trimming
/// - `banned == true` implies `searching == false` and `ban_expires_at` set
/// - `banned == false` implies `ban_expires_at` is `None`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Platform user id owning this profile.
    user_id: UserId,

    /// Platform-provided contact handle, if the user has one.
    handle: Option<String>,

    /// In-game nickname entered by the user.
    nickname: String,

    /// Game the user wants allies for.
    game: String,

    /// Free-text rank in that game.
    rank: String,

    /// Free-text self description.
    description: String,

    /// Whether the profile is visible to browsing users.
    searching: bool,

    /// Whether the profile is suspended by moderation.
    banned: bool,

    /// When the suspension lapses; set exactly while banned.
    ban_expires_at: Option<Timestamp>,
}

impl Profile {
    /// Creates a new profile with searching enabled.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if any text field is empty after trimming
    pub fn new(
        user_id: UserId,
        handle: Option<String>,
        nickname: String,
        game: String,
        rank: String,
        description: String,
    ) -> Result<Self, DomainError> {
        let nickname = Self::validate_text(ProfileField::Nickname, nickname)?;
        let game = Self::validate_text(ProfileField::Game, game)?;
        let rank = Self::validate_text(ProfileField::Rank, rank)?;
        let description = Self::validate_text(ProfileField::Description, description)?;

        Ok(Self {
            user_id,
            handle,
            nickname,
            game,
            rank,
            description,
            searching: true,
            banned: false,
            ban_expires_at: None,
        })
    }

    /// Reconstitute a profile from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        user_id: UserId,
        handle: Option<String>,
        nickname: String,
        game: String,
        rank: String,
        description: String,
        searching: bool,
        banned: bool,
        ban_expires_at: Option<Timestamp>,
    ) -> Self {
        Self {
            user_id,
            handle,
            nickname,
            game,
            rank,
            description,
            searching,
            banned,
            ban_expires_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the owning user id.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the platform contact handle, if any.
    pub fn handle(&self) -> Option<&str> {
        self.handle.as_deref()
    }

    /// Returns the in-game nickname.
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Returns the game.
    pub fn game(&self) -> &str {
        &self.game
    }

    /// Returns the rank.
    pub fn rank(&self) -> &str {
        &self.rank
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns whether the profile is searching for allies.
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Returns whether the profile is currently marked banned.
    ///
    /// A lapsed ban stays marked until observed; see
    /// [`Profile::lift_ban_if_expired`].
    pub fn is_banned(&self) -> bool {
        self.banned
    }

    /// Returns when the ban lapses, if banned.
    pub fn ban_expires_at(&self) -> Option<&Timestamp> {
        self.ban_expires_at.as_ref()
    }

    /// Contact line revealed on a mutual match: the handle when present,
    /// otherwise the opaque user id.
    pub fn contact(&self) -> String {
        match &self.handle {
            Some(handle) => format!("@{}", handle),
            None => format!("id {}", self.user_id),
        }
    }

    /// Whether this profile may be shown to `viewer` browsing for `game`.
    pub fn is_candidate_for(&self, viewer: UserId, game: &str) -> bool {
        self.user_id != viewer && self.searching && !self.banned && self.game == game
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Overwrites a single field, leaving all others untouched.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the value is empty after trimming
    pub fn set_field(&mut self, field: ProfileField, value: String) -> Result<(), DomainError> {
        let value = Self::validate_text(field, value)?;
        match field {
            ProfileField::Nickname => self.nickname = value,
            ProfileField::Game => self.game = value,
            ProfileField::Rank => self.rank = value,
            ProfileField::Description => self.description = value,
        }
        Ok(())
    }

    /// Hides the profile from browsing users.
    pub fn stop_search(&mut self) {
        self.searching = false;
    }

    /// Makes the profile visible to browsing users again.
    ///
    /// # Errors
    ///
    /// - `ProfileBanned` if the profile is currently banned
    pub fn resume_search(&mut self) -> Result<(), DomainError> {
        if self.banned {
            return Err(DomainError::new(
                ErrorCode::ProfileBanned,
                "Banned profiles cannot search for allies",
            ));
        }
        self.searching = true;
        Ok(())
    }

    /// Suspends the profile until `now + duration`.
    ///
    /// Returns the expiry when a new ban was applied, or `None` if the
    /// profile was already banned (an existing ban is never extended).
    pub fn ban(&mut self, now: Timestamp, duration: Duration) -> Option<Timestamp> {
        if self.banned {
            return None;
        }
        let expires_at = Timestamp::from_datetime(*now.as_datetime() + duration);
        self.banned = true;
        self.searching = false;
        self.ban_expires_at = Some(expires_at);
        Some(expires_at)
    }

    /// Clears a lapsed ban; returns true if the ban was lifted.
    ///
    /// Bans are only ever lifted here, on observation - there is no
    /// background sweep.
    pub fn lift_ban_if_expired(&mut self, now: Timestamp) -> bool {
        match self.ban_expires_at {
            Some(expires_at) if self.banned && now.is_after(&expires_at) => {
                self.banned = false;
                self.ban_expires_at = None;
                true
            }
            _ => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_text(field: ProfileField, value: String) -> Result<String, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field(field.name()).into());
        }
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_profile() -> Profile {
        Profile::new(
            UserId::new(1),
            Some("ally_one".to_string()),
            "AllyOne".to_string(),
            "Chess".to_string(),
            "1200".to_string(),
            "Evening games".to_string(),
        )
        .unwrap()
    }

    // Construction tests

    #[test]
    fn new_profile_is_searching() {
        let profile = test_profile();
        assert!(profile.is_searching());
        assert!(!profile.is_banned());
        assert!(profile.ban_expires_at().is_none());
    }

    #[test]
    fn new_profile_rejects_empty_game() {
        let result = Profile::new(
            UserId::new(1),
            None,
            "AllyOne".to_string(),
            "   ".to_string(),
            "1200".to_string(),
            "Evening games".to_string(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_profile_trims_fields() {
        let profile = Profile::new(
            UserId::new(1),
            None,
            " AllyOne ".to_string(),
            " Chess ".to_string(),
            "1200".to_string(),
            "Evening games".to_string(),
        )
        .unwrap();
        assert_eq!(profile.nickname(), "AllyOne");
        assert_eq!(profile.game(), "Chess");
    }

    // Field edit tests

    #[test]
    fn set_field_updates_only_that_field() {
        let mut profile = test_profile();
        profile
            .set_field(ProfileField::Rank, "1500".to_string())
            .unwrap();
        assert_eq!(profile.rank(), "1500");
        assert_eq!(profile.game(), "Chess");
        assert_eq!(profile.nickname(), "AllyOne");
        assert_eq!(profile.description(), "Evening games");
    }

    #[test]
    fn set_field_rejects_empty_value() {
        let mut profile = test_profile();
        let result = profile.set_field(ProfileField::Game, "".to_string());
        assert!(result.is_err());
        assert_eq!(profile.game(), "Chess");
    }

    // Searching tests

    #[test]
    fn stop_and_resume_search_toggle_flag() {
        let mut profile = test_profile();
        profile.stop_search();
        assert!(!profile.is_searching());
        profile.resume_search().unwrap();
        assert!(profile.is_searching());
    }

    #[test]
    fn resume_search_fails_while_banned() {
        let mut profile = test_profile();
        let _ = profile.ban(Timestamp::now(), Duration::days(14));
        assert!(profile.resume_search().is_err());
        assert!(!profile.is_searching());
    }

    // Ban tests

    #[test]
    fn ban_sets_expiry_and_stops_search() {
        let mut profile = test_profile();
        let now = Timestamp::now();
        let expiry = profile.ban(now, Duration::days(14)).unwrap();

        assert!(profile.is_banned());
        assert!(!profile.is_searching());
        assert_eq!(profile.ban_expires_at(), Some(&expiry));
        assert_eq!(expiry.duration_since(&now), Duration::days(14));
    }

    #[test]
    fn ban_while_banned_does_not_extend_expiry() {
        let mut profile = test_profile();
        let now = Timestamp::now();
        let first = profile.ban(now, Duration::days(14)).unwrap();

        let again = profile.ban(now.plus_days(1), Duration::days(14));
        assert!(again.is_none());
        assert_eq!(profile.ban_expires_at(), Some(&first));
    }

    #[test]
    fn lift_ban_after_expiry() {
        let mut profile = test_profile();
        let now = Timestamp::now();
        let _ = profile.ban(now, Duration::days(14));

        assert!(profile.lift_ban_if_expired(now.plus_days(15)));
        assert!(!profile.is_banned());
        assert!(profile.ban_expires_at().is_none());
    }

    #[test]
    fn lift_ban_before_expiry_is_noop() {
        let mut profile = test_profile();
        let now = Timestamp::now();
        let _ = profile.ban(now, Duration::days(14));

        assert!(!profile.lift_ban_if_expired(now.plus_days(13)));
        assert!(profile.is_banned());
    }

    // Candidate predicate tests

    #[test]
    fn candidate_excludes_viewer_self() {
        let profile = test_profile();
        assert!(!profile.is_candidate_for(UserId::new(1), "Chess"));
        assert!(profile.is_candidate_for(UserId::new(2), "Chess"));
    }

    #[test]
    fn candidate_requires_same_game_and_searching() {
        let mut profile = test_profile();
        assert!(!profile.is_candidate_for(UserId::new(2), "Dota"));
        profile.stop_search();
        assert!(!profile.is_candidate_for(UserId::new(2), "Chess"));
    }

    #[test]
    fn banned_profile_is_never_a_candidate() {
        let mut profile = test_profile();
        let _ = profile.ban(Timestamp::now(), Duration::days(14));
        assert!(!profile.is_candidate_for(UserId::new(2), "Chess"));
    }

    // Contact reveal tests

    #[test]
    fn contact_prefers_handle() {
        let profile = test_profile();
        assert_eq!(profile.contact(), "@ally_one");
    }

    #[test]
    fn contact_falls_back_to_id() {
        let profile = Profile::new(
            UserId::new(42),
            None,
            "AllyTwo".to_string(),
            "Chess".to_string(),
            "800".to_string(),
            "Weekends".to_string(),
        )
        .unwrap();
        assert_eq!(profile.contact(), "id 42");
    }
}
