//! Report record and ban decision.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ReportId, Timestamp, UserId};

/// A complaint filed against a target profile.
///
/// Reports are append-only and never deduplicated: the same reporter may
/// file any number of reports against the same target, and every one counts
/// toward the ban threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Unique identifier.
    id: ReportId,

    /// Profile being reported.
    target: UserId,

    /// User filing the report.
    reporter: UserId,

    /// When the report was filed.
    created_at: Timestamp,
}

impl Report {
    /// Creates a new report filed now.
    pub fn new(target: UserId, reporter: UserId) -> Self {
        Self {
            id: ReportId::new(),
            target,
            reporter,
            created_at: Timestamp::now(),
        }
    }

    /// Returns the report id.
    pub fn id(&self) -> ReportId {
        self.id
    }

    /// Returns the reported profile's user id.
    pub fn target(&self) -> UserId {
        self.target
    }

    /// Returns the reporting user id.
    pub fn reporter(&self) -> UserId {
        self.reporter
    }

    /// Returns when the report was filed.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

/// Outcome of filing a report, surfaced so callers can notify both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BanDecision {
    /// The target stays unbanned; total report count so far.
    NotBanned { report_count: u64 },

    /// This report crossed the threshold; a new ban was applied.
    Banned { expires_at: Timestamp },

    /// The target was already banned; the expiry was not extended.
    AlreadyBanned { expires_at: Timestamp },
}
