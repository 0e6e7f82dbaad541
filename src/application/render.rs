//! Shared message rendering for profile cards.

use crate::domain::profile::Profile;

/// Renders the four-line game card shown while browsing, in invites, and
/// for the user's own profile.
pub(crate) fn profile_card(profile: &Profile) -> String {
    format!(
        "🎮 Game: {}\n👤 Nickname: {}\n🏆 Rank: {}\n📝 Description: {}",
        profile.game(),
        profile.nickname(),
        profile.rank(),
        profile.description()
    )
}
