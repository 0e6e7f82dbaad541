//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - in-memory stores and a recording notifier
//! - `logging` - tracing-backed notifier for transportless wiring

pub mod logging;
pub mod memory;

pub use logging::TracingNotifier;
pub use memory::{
    InMemoryInviteStore, InMemoryProfileStore, InMemoryReportStore, RecordingNotifier,
};
