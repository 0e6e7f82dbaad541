//! Invite workflow handlers: send, respond, history.

use std::sync::Arc;
use thiserror::Error;

use crate::application::command::Command;
use crate::application::event::Actor;
use crate::application::render::profile_card;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::invite::{Invite, InviteStatus};
use crate::ports::{Button, InviteStore, Notifier, OutboundMessage, ProfileStore};

/// Errors from the invite handlers.
#[derive(Debug, Clone, Error)]
pub enum InviteError {
    /// A pending invite for the same ordered pair already exists.
    #[error("A pending invite to this user already exists")]
    DuplicatePending,

    /// No pending invite exists from that sender to this recipient.
    #[error("No pending invite from this user")]
    NotFound,

    /// The sender has no profile to attach to the request.
    #[error("No profile exists for this user")]
    ProfileNotFound,

    /// Storage or domain failure.
    #[error(transparent)]
    Domain(DomainError),
}

impl From<DomainError> for InviteError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DuplicatePending => InviteError::DuplicatePending,
            ErrorCode::InviteNotFound => InviteError::NotFound,
            _ => InviteError::Domain(err),
        }
    }
}

/// Request/accept/decline protocol with duplicate suppression and the
/// mutual-match contact reveal.
///
/// The relation is directional by design: accepting an invite never creates
/// or requires one in the reverse direction.
pub struct InviteHandler<P, I, N>
where
    P: ProfileStore,
    I: InviteStore,
    N: Notifier,
{
    profiles: Arc<P>,
    invites: Arc<I>,
    notifier: Arc<N>,
}

impl<P, I, N> InviteHandler<P, I, N>
where
    P: ProfileStore,
    I: InviteStore,
    N: Notifier,
{
    /// Creates a new handler with the given dependencies.
    pub fn new(profiles: Arc<P>, invites: Arc<I>, notifier: Arc<N>) -> Self {
        Self {
            profiles,
            invites,
            notifier,
        }
    }

    /// Sends an ally request from the actor to `recipient`.
    pub async fn send_invite(&self, sender: &Actor, recipient: UserId) -> Result<(), InviteError> {
        let sender_profile = self
            .profiles
            .find(sender.id)
            .await?
            .ok_or(InviteError::ProfileNotFound)?;

        let invite = Invite::new(sender.id, recipient)?;
        self.invites.create_pending(invite).await?;

        let keyboard = vec![
            vec![
                Button::new("Accept", Command::Accept(sender.id).encode()),
                Button::new("Decline", Command::Decline(sender.id).encode()),
            ],
            vec![Button::new("Main menu", Command::MainMenu.encode())],
        ];
        self.notifier
            .send(
                recipient,
                OutboundMessage::with_keyboard(
                    format!(
                        "🎉 You've received an ally request!\n{}",
                        profile_card(&sender_profile)
                    ),
                    keyboard,
                ),
            )
            .await?;
        self.notifier
            .send(sender.id, OutboundMessage::text("✅ Request sent!"))
            .await?;
        tracing::info!(sender = %sender.id, recipient = %recipient, "invite sent");
        Ok(())
    }

    /// Answers the pending invite from `sender` to the acting recipient.
    ///
    /// On accept, both parties receive the mutual-contact reveal: the other
    /// side's handle when present, otherwise their opaque id. On decline,
    /// no contact information is shared.
    pub async fn respond(
        &self,
        recipient: &Actor,
        sender: UserId,
        accept: bool,
    ) -> Result<InviteStatus, InviteError> {
        let mut invite = self
            .invites
            .find_pending(sender, recipient.id)
            .await?
            .ok_or(InviteError::NotFound)?;

        let status = invite.respond(accept)?;
        self.invites.update(&invite).await?;

        if accept {
            self.notifier
                .send(recipient.id, OutboundMessage::text("✅ You accepted the request!"))
                .await?;
            self.reveal_contacts(sender, recipient.id).await?;
        } else {
            self.notifier
                .send(recipient.id, OutboundMessage::text("❌ You declined the request."))
                .await?;
        }
        tracing::info!(sender = %sender, recipient = %recipient.id, status = %status, "invite answered");
        Ok(status)
    }

    /// Sends the user their full invite history, both directions.
    pub async fn history(&self, user_id: UserId) -> Result<(), InviteError> {
        let invites = self.invites.list_for_user(user_id).await?;

        let mut text = String::from("📝 Your invite history:\n\n");
        if invites.is_empty() {
            text.push_str("You have no invite history yet.");
        } else {
            for invite in &invites {
                let line = if invite.sender() == user_id {
                    format!(
                        "You -> {} ({})",
                        self.display_name(invite.recipient()).await?,
                        invite.status().label()
                    )
                } else {
                    format!(
                        "{} -> You ({})",
                        self.display_name(invite.sender()).await?,
                        invite.status().label()
                    )
                };
                text.push_str(&line);
                text.push('\n');
            }
        }

        self.notifier.send(user_id, OutboundMessage::text(text)).await?;
        Ok(())
    }

    /// Delivers the mutual-match contact lines to both parties.
    async fn reveal_contacts(&self, a: UserId, b: UserId) -> Result<(), InviteError> {
        for (me, partner) in [(a, b), (b, a)] {
            let contact = match self.profiles.find(partner).await? {
                Some(profile) => profile.contact(),
                None => format!("id {}", partner),
            };
            self.notifier
                .send(
                    me,
                    OutboundMessage::text(format!(
                        "🎉 Mutual match! Get in touch with your ally: {}",
                        contact
                    )),
                )
                .await?;
        }
        Ok(())
    }

    async fn display_name(&self, user_id: UserId) -> Result<String, InviteError> {
        Ok(match self.profiles.find(user_id).await? {
            Some(profile) => profile.nickname().to_string(),
            None => format!("id {}", user_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryInviteStore, InMemoryProfileStore, RecordingNotifier};
    use crate::domain::profile::Profile;

    type TestHandler = InviteHandler<InMemoryProfileStore, InMemoryInviteStore, RecordingNotifier>;

    async fn setup() -> (
        TestHandler,
        Arc<InMemoryProfileStore>,
        Arc<InMemoryInviteStore>,
        Arc<RecordingNotifier>,
    ) {
        let profiles = Arc::new(InMemoryProfileStore::new());
        let invites = Arc::new(InMemoryInviteStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = InviteHandler::new(
            Arc::clone(&profiles),
            Arc::clone(&invites),
            Arc::clone(&notifier),
        );
        (handler, profiles, invites, notifier)
    }

    async fn seed(profiles: &InMemoryProfileStore, id: i64, handle: Option<&str>) {
        let profile = Profile::new(
            UserId::new(id),
            handle.map(str::to_string),
            format!("player{}", id),
            "Chess".to_string(),
            "gold".to_string(),
            "allies wanted".to_string(),
        )
        .unwrap();
        profiles.upsert(&profile).await.unwrap();
    }

    fn actor(id: i64) -> Actor {
        Actor::new(UserId::new(id), None)
    }

    #[tokio::test]
    async fn send_invite_notifies_recipient_with_actions() {
        let (handler, profiles, _invites, notifier) = setup().await;
        seed(&profiles, 1, Some("ally_one")).await;
        seed(&profiles, 2, None).await;

        handler.send_invite(&actor(1), UserId::new(2)).await.unwrap();

        let to_recipient = notifier.sent_to(UserId::new(2));
        assert_eq!(to_recipient.len(), 1);
        assert!(to_recipient[0].text.contains("player1"));
        assert_eq!(to_recipient[0].keyboard[0][0].payload, "accept_1");
        assert_eq!(to_recipient[0].keyboard[0][1].payload, "decline_1");
        assert!(notifier.has_text_for(UserId::new(1), "Request sent"));
    }

    #[tokio::test]
    async fn second_pending_invite_is_rejected_without_a_row() {
        let (handler, profiles, invites, _notifier) = setup().await;
        seed(&profiles, 1, None).await;
        seed(&profiles, 2, None).await;

        handler.send_invite(&actor(1), UserId::new(2)).await.unwrap();
        let result = handler.send_invite(&actor(1), UserId::new(2)).await;

        assert!(matches!(result, Err(InviteError::DuplicatePending)));
        assert_eq!(invites.len(), 1);
    }

    #[tokio::test]
    async fn accept_reveals_handles_to_both_parties() {
        let (handler, profiles, _invites, notifier) = setup().await;
        seed(&profiles, 1, Some("ally_one")).await;
        seed(&profiles, 2, Some("ally_two")).await;
        handler.send_invite(&actor(1), UserId::new(2)).await.unwrap();
        notifier.clear();

        let status = handler
            .respond(&actor(2), UserId::new(1), true)
            .await
            .unwrap();

        assert_eq!(status, InviteStatus::Accepted);
        assert!(notifier.has_text_for(UserId::new(1), "@ally_two"));
        assert!(notifier.has_text_for(UserId::new(2), "@ally_one"));
    }

    #[tokio::test]
    async fn accept_falls_back_to_id_without_handle() {
        let (handler, profiles, _invites, notifier) = setup().await;
        seed(&profiles, 1, None).await;
        seed(&profiles, 2, Some("ally_two")).await;
        handler.send_invite(&actor(1), UserId::new(2)).await.unwrap();
        notifier.clear();

        handler.respond(&actor(2), UserId::new(1), true).await.unwrap();
        assert!(notifier.has_text_for(UserId::new(2), "id 1"));
    }

    #[tokio::test]
    async fn decline_shares_no_contact_info() {
        let (handler, profiles, invites, notifier) = setup().await;
        seed(&profiles, 1, Some("ally_one")).await;
        seed(&profiles, 2, Some("ally_two")).await;
        handler.send_invite(&actor(1), UserId::new(2)).await.unwrap();
        notifier.clear();

        let status = handler
            .respond(&actor(2), UserId::new(1), false)
            .await
            .unwrap();

        assert_eq!(status, InviteStatus::Rejected);
        assert!(!notifier.has_text_for(UserId::new(1), "ally_two"));
        assert!(!notifier.has_text_for(UserId::new(2), "ally_one"));
        let stored = invites.list_for_user(UserId::new(1)).await.unwrap();
        assert_eq!(stored[0].status(), InviteStatus::Rejected);
    }

    #[tokio::test]
    async fn responding_to_missing_invite_fails() {
        let (handler, profiles, _invites, _notifier) = setup().await;
        seed(&profiles, 1, None).await;
        seed(&profiles, 2, None).await;

        let result = handler.respond(&actor(2), UserId::new(1), true).await;
        assert!(matches!(result, Err(InviteError::NotFound)));
    }

    #[tokio::test]
    async fn accepting_does_not_create_a_reverse_invite() {
        let (handler, profiles, invites, _notifier) = setup().await;
        seed(&profiles, 1, None).await;
        seed(&profiles, 2, None).await;
        handler.send_invite(&actor(1), UserId::new(2)).await.unwrap();

        handler.respond(&actor(2), UserId::new(1), true).await.unwrap();

        assert!(invites
            .find_pending(UserId::new(2), UserId::new(1))
            .await
            .unwrap()
            .is_none());
        assert_eq!(invites.len(), 1);
    }

    #[tokio::test]
    async fn history_renders_both_directions() {
        let (handler, profiles, _invites, notifier) = setup().await;
        seed(&profiles, 1, None).await;
        seed(&profiles, 2, None).await;
        seed(&profiles, 3, None).await;
        handler.send_invite(&actor(1), UserId::new(2)).await.unwrap();
        handler.send_invite(&actor(3), UserId::new(1)).await.unwrap();
        handler.respond(&actor(2), UserId::new(1), false).await.unwrap();
        notifier.clear();

        handler.history(UserId::new(1)).await.unwrap();

        let sent = notifier.sent_to(UserId::new(1));
        assert!(sent[0].text.contains("You -> player2 (declined)"));
        assert!(sent[0].text.contains("player3 -> You (pending)"));
    }
}
