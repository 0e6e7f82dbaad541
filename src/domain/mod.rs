//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `profile` - User game profile aggregate and searching/ban status
//! - `conversation` - Per-user dialog state machine for profile entry
//! - `invite` - Directional ally invite aggregate and status lifecycle
//! - `moderation` - Report records and ban decisions

pub mod conversation;
pub mod foundation;
pub mod invite;
pub mod moderation;
pub mod profile;
