//! Invite status lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Status of a directional ally invite.
///
/// An invite is answered at most once: `Pending` moves to `Accepted` or
/// `Rejected`, both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InviteStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl InviteStatus {
    /// Human status label for history rendering.
    pub fn label(&self) -> &'static str {
        match self {
            InviteStatus::Pending => "pending",
            InviteStatus::Accepted => "accepted",
            InviteStatus::Rejected => "declined",
        }
    }
}

impl fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl StateMachine for InviteStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use InviteStatus::*;
        matches!((self, target), (Pending, Accepted) | (Pending, Rejected))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use InviteStatus::*;
        match self {
            Pending => vec![Accepted, Rejected],
            Accepted | Rejected => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_be_answered_either_way() {
        assert!(InviteStatus::Pending.can_transition_to(&InviteStatus::Accepted));
        assert!(InviteStatus::Pending.can_transition_to(&InviteStatus::Rejected));
    }

    #[test]
    fn answered_invites_are_terminal() {
        assert!(InviteStatus::Accepted.is_terminal());
        assert!(InviteStatus::Rejected.is_terminal());
    }

    #[test]
    fn cannot_flip_an_answer() {
        assert!(InviteStatus::Accepted
            .transition_to(InviteStatus::Rejected)
            .is_err());
    }
}
