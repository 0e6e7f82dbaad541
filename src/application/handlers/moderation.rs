//! Moderation handlers: report intake and lazy ban expiry.

use std::sync::Arc;
use thiserror::Error;

use chrono::Duration;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::moderation::{BanDecision, Report};
use crate::ports::{Notifier, OutboundMessage, ProfileStore, ReportStore};

/// Moderation thresholds; defaults match the production values.
#[derive(Debug, Clone, Copy)]
pub struct ModerationPolicy {
    /// Reports at or above this total trigger a ban.
    pub report_threshold: u64,
    /// How long a triggered ban lasts.
    pub ban_duration: Duration,
}

impl Default for ModerationPolicy {
    fn default() -> Self {
        Self {
            report_threshold: 5,
            ban_duration: Duration::days(14),
        }
    }
}

/// Errors from the moderation handlers.
#[derive(Debug, Clone, Error)]
pub enum ModerationError {
    /// Storage or domain failure.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result of the main-menu ban gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BanGate {
    /// The user is not banned; proceed normally.
    NotBanned,

    /// A lapsed ban was just lifted; the user was notified.
    Lifted,

    /// The ban still holds; the user was told the remaining window.
    StillBanned { expires_at: Timestamp },
}

/// Report intake with threshold-triggered bans, and the lazy expiry check.
///
/// Expiry is enforced only in [`ModerationHandler::check_and_lift_ban`],
/// on the user's next main-menu visit. A banned user who never returns
/// stays marked banned in storage; the ban is lifted on observation, not
/// by wall clock.
pub struct ModerationHandler<P, R, N>
where
    P: ProfileStore,
    R: ReportStore,
    N: Notifier,
{
    profiles: Arc<P>,
    reports: Arc<R>,
    notifier: Arc<N>,
    policy: ModerationPolicy,
}

impl<P, R, N> ModerationHandler<P, R, N>
where
    P: ProfileStore,
    R: ReportStore,
    N: Notifier,
{
    /// Creates a new handler with the given dependencies and policy.
    pub fn new(profiles: Arc<P>, reports: Arc<R>, notifier: Arc<N>, policy: ModerationPolicy) -> Self {
        Self {
            profiles,
            reports,
            notifier,
            policy,
        }
    }

    /// Files a report and re-evaluates the ban threshold for the target.
    ///
    /// Reports are never deduplicated; every row counts. Once banned, a
    /// target's expiry is not extended by further reports.
    pub async fn file_report(
        &self,
        reporter: UserId,
        target: UserId,
    ) -> Result<BanDecision, ModerationError> {
        self.reports.append(Report::new(target, reporter)).await?;
        let report_count = self.reports.count_for_target(target).await?;

        let decision = if report_count >= self.policy.report_threshold {
            match self.profiles.find(target).await? {
                Some(mut profile) => match profile.ban(Timestamp::now(), self.policy.ban_duration) {
                    Some(expires_at) => {
                        self.profiles.upsert(&profile).await?;
                        self.notifier
                            .send(
                                target,
                                OutboundMessage::text(format!(
                                    "⛔ Your profile has been suspended until {} due to multiple reports.",
                                    expires_at.human()
                                )),
                            )
                            .await?;
                        tracing::warn!(target = %target, report_count, "profile banned");
                        BanDecision::Banned { expires_at }
                    }
                    None => BanDecision::AlreadyBanned {
                        expires_at: profile
                            .ban_expires_at()
                            .copied()
                            .unwrap_or_else(Timestamp::now),
                    },
                },
                None => {
                    // Reports can target users who never made a profile;
                    // nothing to suspend.
                    tracing::warn!(target = %target, "report against unknown profile");
                    BanDecision::NotBanned { report_count }
                }
            }
        } else {
            BanDecision::NotBanned { report_count }
        };

        let reporter_text = match decision {
            BanDecision::Banned { .. } => {
                "✅ Report filed. The profile has been suspended after multiple reports."
            }
            _ => "✅ Report filed. Thank you for keeping the community safe.",
        };
        self.notifier
            .send(reporter, OutboundMessage::text(reporter_text))
            .await?;
        Ok(decision)
    }

    /// Checks (and lazily lifts) the user's ban on main-menu entry.
    pub async fn check_and_lift_ban(&self, user_id: UserId) -> Result<BanGate, ModerationError> {
        let Some(mut profile) = self.profiles.find(user_id).await? else {
            return Ok(BanGate::NotBanned);
        };
        if !profile.is_banned() {
            return Ok(BanGate::NotBanned);
        }

        if profile.lift_ban_if_expired(Timestamp::now()) {
            self.profiles.upsert(&profile).await?;
            self.notifier
                .send(
                    user_id,
                    OutboundMessage::text(
                        "✅ Your profile is active again! You can search for allies.",
                    ),
                )
                .await?;
            tracing::info!(user_id = %user_id, "ban lifted");
            return Ok(BanGate::Lifted);
        }

        let expires_at = profile
            .ban_expires_at()
            .copied()
            .unwrap_or_else(Timestamp::now);
        self.notifier
            .send(
                user_id,
                OutboundMessage::text(format!(
                    "⛔ Your profile is suspended until {}. Reason: multiple reports.",
                    expires_at.human()
                )),
            )
            .await?;
        Ok(BanGate::StillBanned { expires_at })
    }
}
