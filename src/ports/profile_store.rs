//! ProfileStore port for profile persistence operations.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::Profile;

/// Store for user profiles and their searching/ban status.
///
/// The store is schema-shaped: profiles are read whole and written whole;
/// all business rules live in the [`Profile`] aggregate. Candidate selection
/// behaves like a `LIMIT 1 OFFSET n` query over insertion order.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert or replace the profile for its user id.
    async fn upsert(&self, profile: &Profile) -> Result<(), DomainError>;

    /// Find a profile by user id.
    async fn find(&self, user_id: UserId) -> Result<Option<Profile>, DomainError>;

    /// Check if a profile exists for the user.
    async fn exists(&self, user_id: UserId) -> Result<bool, DomainError>;

    /// Find the `offset`-th profile (0-based, insertion order) that is a
    /// candidate for `viewer` browsing `game`: same game, searching, not
    /// banned, not the viewer.
    ///
    /// The cursor is forward-only and non-stable: the underlying order may
    /// shift between calls as profiles are created or banned, so a candidate
    /// can be shown again. Callers treat that as expected behavior.
    async fn find_candidate(
        &self,
        viewer: UserId,
        game: &str,
        offset: u32,
    ) -> Result<Option<Profile>, DomainError>;
}
