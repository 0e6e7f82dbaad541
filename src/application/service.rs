//! Top-level event router.
//!
//! One inbound chat event enters, is routed to the right handler under the
//! actor's serialization lock, and every user-visible reply leaves through
//! the notifier port. The transport adapter stays a thin shell around
//! [`AlliesService::handle_event`].

use std::sync::Arc;

use crate::application::command::Command;
use crate::application::event::{Actor, BotCommand, InboundEvent, MAIN_MENU_TEXT};
use crate::application::handlers::{
    BanGate, BrowseError, BrowseHandler, ConversationError, ConversationHandler, InviteError,
    InviteHandler, ModerationError, ModerationHandler, ModerationPolicy, ProfileError,
    ProfileHandler, TextOutcome,
};
use crate::application::sessions::{SessionMap, UserLocks};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{Button, InviteStore, Notifier, OutboundMessage, ProfileStore, ReportStore};

const MISSING_PROFILE_TEXT: &str = "You don't have a profile yet!";

/// The whole matchmaking application behind one entry point.
///
/// Holds the handlers, the dialog sessions and the per-user locks. Every
/// event for one user runs to completion before the next one for that user
/// starts; pair operations (invite, report, accept, decline) additionally
/// hold the other user's lock, acquired in id order.
pub struct AlliesService<P, I, R, N>
where
    P: ProfileStore,
    I: InviteStore,
    R: ReportStore,
    N: Notifier,
{
    profiles: Arc<P>,
    notifier: Arc<N>,
    sessions: Arc<SessionMap>,
    locks: UserLocks,
    conversations: ConversationHandler<P, N>,
    browse: BrowseHandler<P, N>,
    invites: InviteHandler<P, I, N>,
    moderation: ModerationHandler<P, R, N>,
    profile: ProfileHandler<P, N>,
}

impl<P, I, R, N> AlliesService<P, I, R, N>
where
    P: ProfileStore,
    I: InviteStore,
    R: ReportStore,
    N: Notifier,
{
    /// Wires the service from its stores, notifier and moderation policy.
    pub fn new(
        profiles: Arc<P>,
        invites: Arc<I>,
        reports: Arc<R>,
        notifier: Arc<N>,
        policy: ModerationPolicy,
    ) -> Self {
        let sessions = Arc::new(SessionMap::new());
        Self {
            conversations: ConversationHandler::new(
                Arc::clone(&profiles),
                Arc::clone(&notifier),
                Arc::clone(&sessions),
            ),
            browse: BrowseHandler::new(Arc::clone(&profiles), Arc::clone(&notifier)),
            invites: InviteHandler::new(
                Arc::clone(&profiles),
                Arc::clone(&invites),
                Arc::clone(&notifier),
            ),
            moderation: ModerationHandler::new(
                Arc::clone(&profiles),
                Arc::clone(&reports),
                Arc::clone(&notifier),
                policy,
            ),
            profile: ProfileHandler::new(Arc::clone(&profiles), Arc::clone(&notifier)),
            locks: UserLocks::new(),
            sessions,
            profiles,
            notifier,
        }
    }

    /// Routes one inbound event for `actor`.
    ///
    /// User mistakes (duplicate invites, missing profiles, stale buttons)
    /// are answered in chat and return `Ok`; only infrastructure failures
    /// surface as errors.
    pub async fn handle_event(
        &self,
        actor: &Actor,
        event: InboundEvent,
    ) -> Result<(), DomainError> {
        match event {
            InboundEvent::Command(BotCommand::Start) => {
                let _guard = self.locks.acquire(actor.id).await;
                self.sessions.cancel(actor.id).await;
                self.show_main_menu(actor).await
            }
            InboundEvent::Command(BotCommand::Cancel) => {
                let _guard = self.locks.acquire(actor.id).await;
                self.sessions.cancel(actor.id).await;
                self.show_main_menu(actor).await
            }
            InboundEvent::Text(text) if text == MAIN_MENU_TEXT => {
                // The reply-keyboard escape behaves like /cancel.
                let _guard = self.locks.acquire(actor.id).await;
                self.sessions.cancel(actor.id).await;
                self.show_main_menu(actor).await
            }
            InboundEvent::Text(text) => {
                let _guard = self.locks.acquire(actor.id).await;
                self.handle_text(actor, &text).await
            }
            InboundEvent::ButtonPress(payload) => {
                let command = match Command::parse(&payload) {
                    Ok(command) => command,
                    Err(err) => {
                        tracing::error!(user_id = %actor.id, payload, error = %err, "bad button payload");
                        self.notifier
                            .send(
                                actor.id,
                                OutboundMessage::text("Something went wrong. Please try again."),
                            )
                            .await?;
                        return Err(DomainError::new(
                            ErrorCode::MalformedCommand,
                            err.to_string(),
                        ));
                    }
                };
                self.handle_command(actor, command).await
            }
        }
    }

    async fn handle_command(&self, actor: &Actor, command: Command) -> Result<(), DomainError> {
        // Pair commands lock both parties; everything else locks the actor.
        let _guards = match command {
            Command::Invite(other)
            | Command::Report(other)
            | Command::Accept(other)
            | Command::Decline(other) => {
                let (a, b) = self.locks.acquire_pair(actor.id, other).await;
                (a, b)
            }
            _ => (self.locks.acquire(actor.id).await, None),
        };

        match command {
            Command::CreateProfile => match self.conversations.start_creation(actor).await {
                Ok(()) => Ok(()),
                Err(ConversationError::Domain(err)) => Err(err),
                Err(err) => self.reply(actor.id, err.user_message()).await,
            },
            Command::EditProfile => self.show_edit_menu(actor).await,
            Command::ChangeGame | Command::ChangeRank | Command::ChangeDescription => {
                let field = command
                    .edited_field()
                    .ok_or_else(|| DomainError::new(ErrorCode::InternalError, "not an edit command"))?;
                match self.conversations.start_edit(actor, field).await {
                    Ok(()) => Ok(()),
                    Err(ConversationError::Domain(err)) => Err(err),
                    Err(err) => self.reply(actor.id, err.user_message()).await,
                }
            }
            Command::StopSearch => match self.profile.stop_search(actor.id).await {
                Ok(()) => self.show_main_menu(actor).await,
                Err(ProfileError::NotFound) => self.reply(actor.id, MISSING_PROFILE_TEXT).await,
                Err(err) => Err(into_domain(err)),
            },
            Command::ResumeSearch => self.resume_search(actor).await,
            Command::ShowMyProfile => {
                match self.profile.show_profile(actor.id).await {
                    Ok(()) | Err(ProfileError::NotFound) => {}
                    Err(err) => return Err(into_domain(err)),
                }
                self.show_main_menu(actor).await
            }
            Command::InviteHistory => {
                self.invites
                    .history(actor.id)
                    .await
                    .map_err(invite_into_domain)?;
                self.show_main_menu(actor).await
            }
            Command::MainMenu => {
                self.sessions.cancel(actor.id).await;
                self.show_main_menu(actor).await
            }
            Command::Next(offset) => match self.browse.show_candidate(actor.id, offset).await {
                Ok(_) => Ok(()),
                Err(BrowseError::ProfileNotFound) => {
                    self.reply(actor.id, MISSING_PROFILE_TEXT).await?;
                    self.show_main_menu(actor).await
                }
                Err(BrowseError::Domain(err)) => Err(err),
            },
            Command::Invite(recipient) => self.send_invite(actor, recipient).await,
            Command::Report(target) => self.file_report(actor, target).await,
            Command::Accept(sender) => self.answer_invite(actor, sender, true).await,
            Command::Decline(sender) => self.answer_invite(actor, sender, false).await,
        }
    }

    async fn handle_text(&self, actor: &Actor, text: &str) -> Result<(), DomainError> {
        match self.conversations.submit_text(actor, text).await {
            Ok(TextOutcome::NoDialog) => self.show_main_menu(actor).await,
            Ok(TextOutcome::Continued) => Ok(()),
            Ok(TextOutcome::ProfileCreated) => {
                // Fresh profiles drop straight into browsing.
                match self.browse.show_candidate(actor.id, 0).await {
                    Ok(_) => Ok(()),
                    Err(BrowseError::Domain(err)) => Err(err),
                    Err(BrowseError::ProfileNotFound) => Ok(()),
                }
            }
            Ok(TextOutcome::FieldUpdated(_)) => self.show_main_menu(actor).await,
            Err(ConversationError::Domain(err)) => Err(err),
            Err(err) => self.reply(actor.id, err.user_message()).await,
        }
    }

    async fn resume_search(&self, actor: &Actor) -> Result<(), DomainError> {
        match self.profile.resume_search(actor.id).await {
            Ok(()) => {
                match self.browse.show_candidate(actor.id, 0).await {
                    Ok(_) => Ok(()),
                    Err(BrowseError::ProfileNotFound) => Ok(()),
                    Err(BrowseError::Domain(err)) => Err(err),
                }
            }
            Err(ProfileError::NotFound) => self.reply(actor.id, MISSING_PROFILE_TEXT).await,
            Err(ProfileError::Banned) => {
                // The gate either lifts a lapsed ban or explains the window.
                match self
                    .moderation
                    .check_and_lift_ban(actor.id)
                    .await
                    .map_err(moderation_into_domain)?
                {
                    BanGate::Lifted => self.resume_after_lift(actor).await,
                    _ => Ok(()),
                }
            }
            Err(err) => Err(into_domain(err)),
        }
    }

    async fn resume_after_lift(&self, actor: &Actor) -> Result<(), DomainError> {
        match self.profile.resume_search(actor.id).await {
            Ok(()) => match self.browse.show_candidate(actor.id, 0).await {
                Ok(_) => Ok(()),
                Err(BrowseError::ProfileNotFound) => Ok(()),
                Err(BrowseError::Domain(err)) => Err(err),
            },
            Err(ProfileError::NotFound | ProfileError::Banned) => Ok(()),
            Err(err) => Err(into_domain(err)),
        }
    }

    async fn send_invite(&self, actor: &Actor, recipient: UserId) -> Result<(), DomainError> {
        if recipient == actor.id {
            return self.reply(actor.id, "You cannot invite yourself.").await;
        }
        match self.invites.send_invite(actor, recipient).await {
            Ok(()) => Ok(()),
            Err(InviteError::DuplicatePending) => {
                self.reply(actor.id, "You already sent a request to this user!")
                    .await
            }
            Err(InviteError::ProfileNotFound) => self.reply(actor.id, MISSING_PROFILE_TEXT).await,
            Err(err) => Err(invite_into_domain(err)),
        }
    }

    async fn file_report(&self, actor: &Actor, target: UserId) -> Result<(), DomainError> {
        if target == actor.id {
            return self.reply(actor.id, "You cannot report yourself.").await;
        }
        self.moderation
            .file_report(actor.id, target)
            .await
            .map_err(moderation_into_domain)?;
        Ok(())
    }

    async fn answer_invite(
        &self,
        actor: &Actor,
        sender: UserId,
        accept: bool,
    ) -> Result<(), DomainError> {
        match self.invites.respond(actor, sender, accept).await {
            Ok(_) => self.show_main_menu(actor).await,
            Err(InviteError::NotFound) => {
                // Stale button; the invite was already answered.
                self.reply(actor.id, "This invite is no longer available.")
                    .await?;
                self.show_main_menu(actor).await
            }
            Err(err) => Err(invite_into_domain(err)),
        }
    }

    /// Shows the main menu, gated on the lazy ban check.
    ///
    /// This observation point is the only place a lapsed ban gets lifted.
    /// A still-banned user sees the moderation notice instead of the menu.
    async fn show_main_menu(&self, actor: &Actor) -> Result<(), DomainError> {
        match self
            .moderation
            .check_and_lift_ban(actor.id)
            .await
            .map_err(moderation_into_domain)?
        {
            BanGate::StillBanned { .. } => return Ok(()),
            BanGate::NotBanned | BanGate::Lifted => {}
        }

        let message = if self.profiles.exists(actor.id).await? {
            OutboundMessage::with_keyboard(
                "Main menu:",
                vec![
                    vec![Button::new("Resume search", Command::ResumeSearch.encode())],
                    vec![
                        Button::new("Edit profile", Command::EditProfile.encode()),
                        Button::new("Stop search", Command::StopSearch.encode()),
                    ],
                    vec![
                        Button::new("Invite history", Command::InviteHistory.encode()),
                        Button::new("My profile", Command::ShowMyProfile.encode()),
                    ],
                ],
            )
        } else {
            OutboundMessage::with_keyboard(
                "Create a profile to get started:",
                vec![vec![Button::new(
                    "Create profile",
                    Command::CreateProfile.encode(),
                )]],
            )
        };
        self.notifier.send(actor.id, message).await
    }

    async fn show_edit_menu(&self, actor: &Actor) -> Result<(), DomainError> {
        if !self.profiles.exists(actor.id).await? {
            return self.reply(actor.id, MISSING_PROFILE_TEXT).await;
        }
        self.notifier
            .send(
                actor.id,
                OutboundMessage::with_keyboard(
                    "What do you want to change?",
                    vec![
                        vec![Button::new("Game", Command::ChangeGame.encode())],
                        vec![Button::new("Rank", Command::ChangeRank.encode())],
                        vec![Button::new("Description", Command::ChangeDescription.encode())],
                    ],
                ),
            )
            .await
    }

    async fn reply(&self, to: UserId, text: impl Into<String>) -> Result<(), DomainError> {
        self.notifier.send(to, OutboundMessage::text(text)).await
    }
}

fn into_domain(err: ProfileError) -> DomainError {
    match err {
        ProfileError::NotFound => DomainError::new(ErrorCode::ProfileNotFound, "profile not found"),
        ProfileError::Banned => DomainError::new(ErrorCode::ProfileBanned, "profile is suspended"),
        ProfileError::Domain(err) => err,
    }
}

fn invite_into_domain(err: InviteError) -> DomainError {
    match err {
        InviteError::DuplicatePending => {
            DomainError::new(ErrorCode::DuplicatePending, "pending invite already exists")
        }
        InviteError::NotFound => DomainError::new(ErrorCode::InviteNotFound, "invite not found"),
        InviteError::ProfileNotFound => {
            DomainError::new(ErrorCode::ProfileNotFound, "profile not found")
        }
        InviteError::Domain(err) => err,
    }
}

fn moderation_into_domain(err: ModerationError) -> DomainError {
    match err {
        ModerationError::Domain(err) => err,
    }
}
