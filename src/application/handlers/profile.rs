//! Profile view and search-toggle handlers.

use std::sync::Arc;
use thiserror::Error;

use crate::application::render::profile_card;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{Notifier, OutboundMessage, ProfileStore};

/// Errors from the profile handlers.
#[derive(Debug, Clone, Error)]
pub enum ProfileError {
    /// The user has no profile yet.
    #[error("profile not found")]
    NotFound,

    /// A suspended profile cannot resume searching.
    #[error("profile is suspended")]
    Banned,

    /// Storage or domain failure.
    #[error(transparent)]
    Domain(DomainError),
}

impl From<DomainError> for ProfileError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ProfileNotFound => Self::NotFound,
            ErrorCode::ProfileBanned => Self::Banned,
            _ => Self::Domain(err),
        }
    }
}

/// Read-side profile card plus the stop/resume search toggles.
pub struct ProfileHandler<P, N>
where
    P: ProfileStore,
    N: Notifier,
{
    profiles: Arc<P>,
    notifier: Arc<N>,
}

impl<P, N> ProfileHandler<P, N>
where
    P: ProfileStore,
    N: Notifier,
{
    pub fn new(profiles: Arc<P>, notifier: Arc<N>) -> Self {
        Self { profiles, notifier }
    }

    /// Sends the user their own profile card.
    pub async fn show_profile(&self, user_id: UserId) -> Result<(), ProfileError> {
        match self.profiles.find(user_id).await? {
            Some(profile) => {
                self.notifier
                    .send(user_id, OutboundMessage::text(profile_card(&profile)))
                    .await?;
                Ok(())
            }
            None => {
                self.notifier
                    .send(
                        user_id,
                        OutboundMessage::text("You don't have a profile yet!"),
                    )
                    .await?;
                Err(ProfileError::NotFound)
            }
        }
    }

    /// Withdraws the user from candidate browsing.
    pub async fn stop_search(&self, user_id: UserId) -> Result<(), ProfileError> {
        let mut profile = self
            .profiles
            .find(user_id)
            .await?
            .ok_or(ProfileError::NotFound)?;
        profile.stop_search();
        self.profiles.upsert(&profile).await?;
        self.notifier
            .send(user_id, OutboundMessage::text("Search stopped."))
            .await?;
        Ok(())
    }

    /// Puts the user back into the candidate pool.
    ///
    /// Fails with [`ProfileError::Banned`] for suspended profiles; the
    /// ban gate handles the user-facing message in that case.
    pub async fn resume_search(&self, user_id: UserId) -> Result<(), ProfileError> {
        let mut profile = self
            .profiles
            .find(user_id)
            .await?
            .ok_or(ProfileError::NotFound)?;
        profile.resume_search()?;
        self.profiles.upsert(&profile).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryProfileStore, RecordingNotifier};
    use crate::domain::foundation::Timestamp;
    use crate::domain::profile::Profile;
    use chrono::Duration;

    async fn setup() -> (
        ProfileHandler<InMemoryProfileStore, RecordingNotifier>,
        Arc<InMemoryProfileStore>,
        Arc<RecordingNotifier>,
    ) {
        let profiles = Arc::new(InMemoryProfileStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = ProfileHandler::new(Arc::clone(&profiles), Arc::clone(&notifier));
        (handler, profiles, notifier)
    }

    async fn seed(profiles: &InMemoryProfileStore, id: i64) -> Profile {
        let profile = Profile::new(
            UserId::new(id),
            Some(format!("user{}", id)),
            format!("player{}", id),
            "Chess".to_string(),
            "gold".to_string(),
            "allies wanted".to_string(),
        )
        .unwrap();
        profiles.upsert(&profile).await.unwrap();
        profile
    }

    #[tokio::test]
    async fn show_profile_sends_card() {
        let (handler, profiles, notifier) = setup().await;
        seed(&profiles, 1).await;

        handler.show_profile(UserId::new(1)).await.unwrap();
        assert!(notifier.has_text_for(UserId::new(1), "🎮 Game: Chess"));
        assert!(notifier.has_text_for(UserId::new(1), "👤 Nickname: player1"));
    }

    #[tokio::test]
    async fn show_profile_without_profile_nudges() {
        let (handler, _profiles, notifier) = setup().await;

        let err = handler.show_profile(UserId::new(1)).await.unwrap_err();
        assert!(matches!(err, ProfileError::NotFound));
        assert!(notifier.has_text_for(UserId::new(1), "don't have a profile"));
    }

    #[tokio::test]
    async fn stop_then_resume_toggles_searching() {
        let (handler, profiles, _notifier) = setup().await;
        seed(&profiles, 1).await;

        handler.stop_search(UserId::new(1)).await.unwrap();
        let stored = profiles.find(UserId::new(1)).await.unwrap().unwrap();
        assert!(!stored.is_searching());

        handler.resume_search(UserId::new(1)).await.unwrap();
        let stored = profiles.find(UserId::new(1)).await.unwrap().unwrap();
        assert!(stored.is_searching());
    }

    #[tokio::test]
    async fn banned_profile_cannot_resume() {
        let (handler, profiles, _notifier) = setup().await;
        let mut profile = seed(&profiles, 1).await;
        let _ = profile.ban(Timestamp::now(), Duration::days(14));
        profiles.upsert(&profile).await.unwrap();

        let err = handler.resume_search(UserId::new(1)).await.unwrap_err();
        assert!(matches!(err, ProfileError::Banned));
    }
}
