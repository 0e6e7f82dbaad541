//! Candidate browsing handler.

use std::sync::Arc;
use thiserror::Error;

use crate::application::command::Command;
use crate::application::render::profile_card;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{Button, Notifier, OutboundMessage, ProfileStore};

/// Errors from the browse handler.
#[derive(Debug, Clone, Error)]
pub enum BrowseError {
    /// The viewer has no profile to browse with.
    #[error("No profile exists for this user")]
    ProfileNotFound,

    /// Storage or domain failure.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// What happened when a candidate was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseOutcome {
    /// A candidate card was shown.
    Shown { candidate: UserId, offset: u32 },

    /// No candidate at this offset; the set is exhausted for now.
    Exhausted,

    /// The viewer is banned; a moderation notice was shown instead.
    ViewerBanned,
}

/// Stateless, cursor-paginated candidate selection.
///
/// The cursor is forward-only with no skip-back and no dedup against
/// candidates the viewer already passed; insertion-order shifts between
/// calls (new profiles, bans) can re-show a candidate. That is expected,
/// non-stable pagination, not a defect.
pub struct BrowseHandler<P, N>
where
    P: ProfileStore,
    N: Notifier,
{
    profiles: Arc<P>,
    notifier: Arc<N>,
}

impl<P, N> BrowseHandler<P, N>
where
    P: ProfileStore,
    N: Notifier,
{
    /// Creates a new handler with the given dependencies.
    pub fn new(profiles: Arc<P>, notifier: Arc<N>) -> Self {
        Self { profiles, notifier }
    }

    /// Shows the viewer the candidate at `offset`, 0-based.
    pub async fn show_candidate(
        &self,
        viewer: UserId,
        offset: u32,
    ) -> Result<BrowseOutcome, BrowseError> {
        let profile = self
            .profiles
            .find(viewer)
            .await?
            .ok_or(BrowseError::ProfileNotFound)?;

        // Re-check the viewer's own ban before returning anything.
        if profile.is_banned() {
            self.notifier
                .send(
                    viewer,
                    OutboundMessage::text(
                        "⛔ Your profile is suspended. You cannot search for allies.",
                    ),
                )
                .await?;
            return Ok(BrowseOutcome::ViewerBanned);
        }

        match self
            .profiles
            .find_candidate(viewer, profile.game(), offset)
            .await?
        {
            Some(candidate) => {
                let keyboard = vec![
                    vec![Button::new(
                        "Next profile",
                        Command::Next(offset + 1).encode(),
                    )],
                    vec![
                        Button::new("Send request", Command::Invite(candidate.user_id()).encode()),
                        Button::new("Stop searching", Command::StopSearch.encode()),
                    ],
                    vec![
                        Button::new("Edit profile", Command::EditProfile.encode()),
                        Button::new("Report profile", Command::Report(candidate.user_id()).encode()),
                    ],
                ];
                self.notifier
                    .send(
                        viewer,
                        OutboundMessage::with_keyboard(profile_card(&candidate), keyboard),
                    )
                    .await?;
                Ok(BrowseOutcome::Shown {
                    candidate: candidate.user_id(),
                    offset,
                })
            }
            None => {
                self.notifier
                    .send(
                        viewer,
                        OutboundMessage::text("No matching profiles yet. Check back later."),
                    )
                    .await?;
                Ok(BrowseOutcome::Exhausted)
            }
        }
    }
}
