//! Profile domain - user game cards and their matchmaking status.

mod field;
#[allow(clippy::module_inception)]
mod profile;

pub use field::ProfileField;
pub use profile::Profile;
