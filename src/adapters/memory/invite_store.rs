//! In-memory InviteStore implementation.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::invite::Invite;
use crate::ports::InviteStore;

/// In-memory invite store.
///
/// The duplicate-pending guard runs under the same write lock as the
/// insert, so two racing `create_pending` calls for one ordered pair cannot
/// both succeed.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned.
pub struct InMemoryInviteStore {
    invites: RwLock<Vec<Invite>>,
}

impl InMemoryInviteStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            invites: RwLock::new(Vec::new()),
        }
    }

    /// Number of invite rows ever created (for test assertions).
    pub fn len(&self) -> usize {
        self.invites
            .read()
            .expect("InMemoryInviteStore: lock poisoned")
            .len()
    }

    /// Returns true if no invites are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryInviteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InviteStore for InMemoryInviteStore {
    async fn create_pending(&self, invite: Invite) -> Result<(), DomainError> {
        let mut invites = self
            .invites
            .write()
            .expect("InMemoryInviteStore: lock poisoned");
        let duplicate = invites.iter().any(|i| {
            i.is_pending() && i.sender() == invite.sender() && i.recipient() == invite.recipient()
        });
        if duplicate {
            return Err(DomainError::new(
                ErrorCode::DuplicatePending,
                "A pending invite to this user already exists",
            ));
        }
        invites.push(invite);
        Ok(())
    }

    async fn find_pending(
        &self,
        sender: UserId,
        recipient: UserId,
    ) -> Result<Option<Invite>, DomainError> {
        Ok(self
            .invites
            .read()
            .expect("InMemoryInviteStore: lock poisoned")
            .iter()
            .find(|i| i.is_pending() && i.sender() == sender && i.recipient() == recipient)
            .cloned())
    }

    async fn update(&self, invite: &Invite) -> Result<(), DomainError> {
        let mut invites = self
            .invites
            .write()
            .expect("InMemoryInviteStore: lock poisoned");
        match invites.iter().position(|i| i.id() == invite.id()) {
            Some(pos) => {
                invites[pos] = invite.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::InviteNotFound,
                "Invite not found",
            )),
        }
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Invite>, DomainError> {
        Ok(self
            .invites
            .read()
            .expect("InMemoryInviteStore: lock poisoned")
            .iter()
            .filter(|i| i.sender() == user_id || i.recipient() == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_pending_is_rejected_without_insert() {
        let store = InMemoryInviteStore::new();
        let first = Invite::new(UserId::new(1), UserId::new(2)).unwrap();
        store.create_pending(first).await.unwrap();

        let second = Invite::new(UserId::new(1), UserId::new(2)).unwrap();
        let err = store.create_pending(second).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicatePending);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn reverse_direction_is_not_a_duplicate() {
        let store = InMemoryInviteStore::new();
        store
            .create_pending(Invite::new(UserId::new(1), UserId::new(2)).unwrap())
            .await
            .unwrap();
        store
            .create_pending(Invite::new(UserId::new(2), UserId::new(1)).unwrap())
            .await
            .unwrap();
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn answered_invite_allows_a_new_pending_one() {
        let store = InMemoryInviteStore::new();
        let mut invite = Invite::new(UserId::new(1), UserId::new(2)).unwrap();
        store.create_pending(invite.clone()).await.unwrap();

        invite.respond(false).unwrap();
        store.update(&invite).await.unwrap();

        store
            .create_pending(Invite::new(UserId::new(1), UserId::new(2)).unwrap())
            .await
            .unwrap();
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn update_unknown_invite_fails() {
        let store = InMemoryInviteStore::new();
        let invite = Invite::new(UserId::new(1), UserId::new(2)).unwrap();
        let err = store.update(&invite).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InviteNotFound);
    }

    #[tokio::test]
    async fn list_for_user_covers_both_directions() {
        let store = InMemoryInviteStore::new();
        store
            .create_pending(Invite::new(UserId::new(1), UserId::new(2)).unwrap())
            .await
            .unwrap();
        store
            .create_pending(Invite::new(UserId::new(3), UserId::new(1)).unwrap())
            .await
            .unwrap();
        store
            .create_pending(Invite::new(UserId::new(2), UserId::new(3)).unwrap())
            .await
            .unwrap();

        let list = store.list_for_user(UserId::new(1)).await.unwrap();
        assert_eq!(list.len(), 2);
    }
}
