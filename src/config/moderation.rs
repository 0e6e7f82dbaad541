//! Moderation configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::ModerationPolicy;

/// Moderation thresholds
#[derive(Debug, Clone, Deserialize)]
pub struct ModerationConfig {
    /// Distinct report rows at which a profile is suspended
    #[serde(default = "default_report_threshold")]
    pub report_threshold: u64,

    /// Suspension length in days
    #[serde(default = "default_ban_days")]
    pub ban_days: i64,
}

impl ModerationConfig {
    /// Convert into the application-layer policy
    pub fn policy(&self) -> ModerationPolicy {
        ModerationPolicy {
            report_threshold: self.report_threshold,
            ban_duration: chrono::Duration::days(self.ban_days),
        }
    }

    /// Validate moderation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.report_threshold == 0 {
            return Err(ValidationError::InvalidReportThreshold);
        }
        if self.ban_days <= 0 {
            return Err(ValidationError::InvalidBanDuration);
        }
        Ok(())
    }
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            report_threshold: default_report_threshold(),
            ban_days: default_ban_days(),
        }
    }
}

fn default_report_threshold() -> u64 {
    5
}

fn default_ban_days() -> i64 {
    14
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_policy_defaults() {
        let config = ModerationConfig::default();
        assert!(config.validate().is_ok());
        let policy = config.policy();
        assert_eq!(policy.report_threshold, 5);
        assert_eq!(policy.ban_duration, chrono::Duration::days(14));
    }

    #[test]
    fn zero_threshold_fails_validation() {
        let config = ModerationConfig {
            report_threshold: 0,
            ..ModerationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidReportThreshold)
        ));
    }

    #[test]
    fn nonpositive_ban_fails_validation() {
        let config = ModerationConfig {
            ban_days: 0,
            ..ModerationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidBanDuration)
        ));
    }
}
