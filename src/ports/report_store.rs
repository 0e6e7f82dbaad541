//! ReportStore port for report persistence operations.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::moderation::Report;

/// Append-only store for abuse reports.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Append a report row. Reports are never deduplicated.
    async fn append(&self, report: Report) -> Result<(), DomainError>;

    /// Total number of reports ever filed against the target.
    async fn count_for_target(&self, target: UserId) -> Result<u64, DomainError>;
}
