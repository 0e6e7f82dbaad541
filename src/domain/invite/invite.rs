//! Invite aggregate entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, InviteId, StateMachine, Timestamp, UserId};

use super::InviteStatus;

/// A directional ally request from one user to another.
///
/// Invites are never deleted; answered invites remain as history.
///
/// # Invariants
///
/// - `sender != recipient`
/// - At most one `Pending` invite exists per ordered (sender, recipient)
///   pair (enforced by the store)
/// - Status changes exactly once, from `Pending`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invite {
    /// Unique identifier.
    id: InviteId,

    /// User who sent the request.
    sender: UserId,

    /// User being asked to become an ally.
    recipient: UserId,

    /// Current status.
    status: InviteStatus,

    /// When the invite was created.
    created_at: Timestamp,
}

impl Invite {
    /// Creates a new pending invite.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if sender and recipient are the same user
    pub fn new(sender: UserId, recipient: UserId) -> Result<Self, DomainError> {
        if sender == recipient {
            return Err(DomainError::validation(
                "recipient",
                "Cannot invite yourself",
            ));
        }
        Ok(Self {
            id: InviteId::new(),
            sender,
            recipient,
            status: InviteStatus::Pending,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute an invite from persistence (no validation).
    pub fn reconstitute(
        id: InviteId,
        sender: UserId,
        recipient: UserId,
        status: InviteStatus,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            sender,
            recipient,
            status,
            created_at,
        }
    }

    /// Returns the invite id.
    pub fn id(&self) -> InviteId {
        self.id
    }

    /// Returns the sending user.
    pub fn sender(&self) -> UserId {
        self.sender
    }

    /// Returns the receiving user.
    pub fn recipient(&self) -> UserId {
        self.recipient
    }

    /// Returns the current status.
    pub fn status(&self) -> InviteStatus {
        self.status
    }

    /// Returns when the invite was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns true while the invite awaits an answer.
    pub fn is_pending(&self) -> bool {
        self.status == InviteStatus::Pending
    }

    /// Answers the invite.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the invite was already answered
    pub fn respond(&mut self, accept: bool) -> Result<InviteStatus, DomainError> {
        let target = if accept {
            InviteStatus::Accepted
        } else {
            InviteStatus::Rejected
        };
        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Invite was already answered",
            )
        })?;
        Ok(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_invite() -> Invite {
        Invite::new(UserId::new(1), UserId::new(2)).unwrap()
    }

    #[test]
    fn new_invite_is_pending() {
        let invite = test_invite();
        assert!(invite.is_pending());
        assert_eq!(invite.status(), InviteStatus::Pending);
    }

    #[test]
    fn self_invite_is_rejected() {
        let result = Invite::new(UserId::new(1), UserId::new(1));
        assert!(result.is_err());
    }

    #[test]
    fn accept_moves_to_accepted() {
        let mut invite = test_invite();
        assert_eq!(invite.respond(true).unwrap(), InviteStatus::Accepted);
        assert!(!invite.is_pending());
    }

    #[test]
    fn decline_moves_to_rejected() {
        let mut invite = test_invite();
        assert_eq!(invite.respond(false).unwrap(), InviteStatus::Rejected);
    }

    #[test]
    fn responding_twice_fails() {
        let mut invite = test_invite();
        invite.respond(true).unwrap();
        let result = invite.respond(false);
        assert!(result.is_err());
        assert_eq!(invite.status(), InviteStatus::Accepted);
    }
}
