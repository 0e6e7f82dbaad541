//! In-memory ReportStore implementation.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::moderation::Report;
use crate::ports::ReportStore;

/// In-memory append-only report store.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned.
pub struct InMemoryReportStore {
    reports: RwLock<Vec<Report>>,
}

impl InMemoryReportStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            reports: RwLock::new(Vec::new()),
        }
    }

    /// Total number of report rows (for test assertions).
    pub fn len(&self) -> usize {
        self.reports
            .read()
            .expect("InMemoryReportStore: lock poisoned")
            .len()
    }

    /// Returns true if no reports are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryReportStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn append(&self, report: Report) -> Result<(), DomainError> {
        self.reports
            .write()
            .expect("InMemoryReportStore: lock poisoned")
            .push(report);
        Ok(())
    }

    async fn count_for_target(&self, target: UserId) -> Result<u64, DomainError> {
        Ok(self
            .reports
            .read()
            .expect("InMemoryReportStore: lock poisoned")
            .iter()
            .filter(|r| r.target() == target)
            .count() as u64)
    }
}
