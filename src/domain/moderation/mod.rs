//! Moderation domain - reports and the ban lifecycle.

mod report;

pub use report::{BanDecision, Report};
