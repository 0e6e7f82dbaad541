//! In-memory adapters.
//!
//! Stand-ins for the real persistence engine and chat
//! transport: deterministic, lock-guarded, suitable for tests and local
//! wiring.

mod invite_store;
mod notifier;
mod profile_store;
mod report_store;

pub use invite_store::InMemoryInviteStore;
pub use notifier::RecordingNotifier;
pub use profile_store::InMemoryProfileStore;
pub use report_store::InMemoryReportStore;
