//! In-memory ProfileStore implementation.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::Profile;
use crate::ports::ProfileStore;

/// In-memory profile store.
///
/// Profiles are kept in insertion order so candidate offsets behave like a
/// `LIMIT 1 OFFSET n` scan over a table with a serial key.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned.
pub struct InMemoryProfileStore {
    profiles: RwLock<Vec<Profile>>,
}

impl InMemoryProfileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored profiles (for test assertions).
    pub fn len(&self) -> usize {
        self.profiles
            .read()
            .expect("InMemoryProfileStore: lock poisoned")
            .len()
    }

    /// Returns true if no profiles are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn upsert(&self, profile: &Profile) -> Result<(), DomainError> {
        let mut profiles = self
            .profiles
            .write()
            .expect("InMemoryProfileStore: lock poisoned");
        match profiles.iter().position(|p| p.user_id() == profile.user_id()) {
            Some(pos) => profiles[pos] = profile.clone(),
            None => profiles.push(profile.clone()),
        }
        Ok(())
    }

    async fn find(&self, user_id: UserId) -> Result<Option<Profile>, DomainError> {
        Ok(self
            .profiles
            .read()
            .expect("InMemoryProfileStore: lock poisoned")
            .iter()
            .find(|p| p.user_id() == user_id)
            .cloned())
    }

    async fn exists(&self, user_id: UserId) -> Result<bool, DomainError> {
        Ok(self
            .profiles
            .read()
            .expect("InMemoryProfileStore: lock poisoned")
            .iter()
            .any(|p| p.user_id() == user_id))
    }

    async fn find_candidate(
        &self,
        viewer: UserId,
        game: &str,
        offset: u32,
    ) -> Result<Option<Profile>, DomainError> {
        Ok(self
            .profiles
            .read()
            .expect("InMemoryProfileStore: lock poisoned")
            .iter()
            .filter(|p| p.is_candidate_for(viewer, game))
            .nth(offset as usize)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: i64, game: &str) -> Profile {
        Profile::new(
            UserId::new(id),
            None,
            format!("player{}", id),
            game.to_string(),
            "gold".to_string(),
            "looking for allies".to_string(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn upsert_replaces_in_place() {
        let store = InMemoryProfileStore::new();
        store.upsert(&profile(1, "Chess")).await.unwrap();

        let mut updated = profile(1, "Chess");
        updated
            .set_field(crate::domain::profile::ProfileField::Rank, "2000".to_string())
            .unwrap();
        store.upsert(&updated).await.unwrap();

        assert_eq!(store.len(), 1);
        let found = store.find(UserId::new(1)).await.unwrap().unwrap();
        assert_eq!(found.rank(), "2000");
    }

    #[tokio::test]
    async fn find_candidate_walks_insertion_order() {
        let store = InMemoryProfileStore::new();
        store.upsert(&profile(1, "Chess")).await.unwrap();
        store.upsert(&profile(2, "Chess")).await.unwrap();
        store.upsert(&profile(3, "Dota")).await.unwrap();
        store.upsert(&profile(4, "Chess")).await.unwrap();

        let viewer = UserId::new(1);
        let first = store.find_candidate(viewer, "Chess", 0).await.unwrap().unwrap();
        let second = store.find_candidate(viewer, "Chess", 1).await.unwrap().unwrap();
        assert_eq!(first.user_id(), UserId::new(2));
        assert_eq!(second.user_id(), UserId::new(4));

        assert!(store.find_candidate(viewer, "Chess", 2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_candidate_skips_non_searching_and_banned() {
        let store = InMemoryProfileStore::new();
        let mut stopped = profile(2, "Chess");
        stopped.stop_search();
        let mut banned = profile(3, "Chess");
        banned.ban(
            crate::domain::foundation::Timestamp::now(),
            chrono::Duration::days(14),
        );
        store.upsert(&profile(1, "Chess")).await.unwrap();
        store.upsert(&stopped).await.unwrap();
        store.upsert(&banned).await.unwrap();
        store.upsert(&profile(4, "Chess")).await.unwrap();

        let found = store
            .find_candidate(UserId::new(1), "Chess", 0)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.user_id(), UserId::new(4));
    }

    #[tokio::test]
    async fn exists_reflects_upserts() {
        let store = InMemoryProfileStore::new();
        assert!(!store.exists(UserId::new(1)).await.unwrap());
        store.upsert(&profile(1, "Chess")).await.unwrap();
        assert!(store.exists(UserId::new(1)).await.unwrap());
    }
}
