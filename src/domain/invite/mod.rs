//! Invite domain - directional ally requests and their lifecycle.

#[allow(clippy::module_inception)]
mod invite;
mod status;

pub use invite::Invite;
pub use status::InviteStatus;
