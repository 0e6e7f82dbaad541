//! InviteStore port for invite persistence operations.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::invite::Invite;

/// Store for ally invites.
///
/// Rows are never deleted; answered invites form the user's history.
#[async_trait]
pub trait InviteStore: Send + Sync {
    /// Insert a new pending invite.
    ///
    /// The duplicate guard is atomic with the insert: if a pending invite
    /// already exists for the same ordered (sender, recipient) pair, fails
    /// with `DuplicatePending` and inserts nothing.
    async fn create_pending(&self, invite: Invite) -> Result<(), DomainError>;

    /// Find the pending invite from `sender` to `recipient`, if any.
    async fn find_pending(
        &self,
        sender: UserId,
        recipient: UserId,
    ) -> Result<Option<Invite>, DomainError>;

    /// Persist an answered invite.
    ///
    /// # Errors
    ///
    /// - `InviteNotFound` if no invite with this id exists
    async fn update(&self, invite: &Invite) -> Result<(), DomainError>;

    /// All invites where the user is sender or recipient, oldest first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Invite>, DomainError>;
}
