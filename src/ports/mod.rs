//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ProfileStore` - profile rows and candidate selection
//! - `InviteStore` - invite rows with the atomic duplicate-pending guard
//! - `ReportStore` - append-only report rows
//! - `Notifier` - outbound messages to the chat transport

mod invite_store;
mod notifier;
mod profile_store;
mod report_store;

pub use invite_store::InviteStore;
pub use notifier::{Button, Notifier, OutboundMessage};
pub use profile_store::ProfileStore;
pub use report_store::ReportStore;
