//! Scheduler configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

/// Scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Max concurrent in-flight operations
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// Minimum milliseconds between two consecutive operation starts
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

fn default_max_concurrent() -> usize {
    5
}

fn default_min_interval_ms() -> u64 {
    300
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 5,
            min_interval_ms: 300,
        }
    }
}

impl SchedulerConfig {
    /// Get the minimum start spacing as a Duration
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Reject configurations that could never admit a job
    ///
    /// `min_interval_ms == 0` is valid (unthrottled starts), but
    /// `max_concurrent == 0` would deadlock the queue.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.max_concurrent == 0 {
            return Err(SchedulerError::InvalidConcurrency {
                max_concurrent: self.max_concurrent,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SchedulerConfig::default();
        assert_eq!(config.max_concurrent, 5);
        assert_eq!(config.min_interval_ms, 300);
    }

    #[test]
    fn test_min_interval_duration() {
        let config = SchedulerConfig {
            min_interval_ms: 1500,
            ..Default::default()
        };
        assert_eq!(config.min_interval(), Duration::from_millis(1500));
    }

    #[test]
    fn test_validate_accepts_default() {
        assert!(SchedulerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let config = SchedulerConfig {
            max_concurrent: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(SchedulerError::InvalidConcurrency { max_concurrent: 0 })
        );
    }

    #[test]
    fn test_validate_accepts_zero_interval() {
        let config = SchedulerConfig {
            min_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serde_defaults() {
        let config: SchedulerConfig = serde_json::from_str("{}").expect("empty config");
        assert_eq!(config.max_concurrent, 5);
        assert_eq!(config.min_interval_ms, 300);
    }

    #[test]
    fn test_serde_partial_override() {
        let config: SchedulerConfig =
            serde_json::from_str(r#"{"max_concurrent": 2}"#).expect("partial config");
        assert_eq!(config.max_concurrent, 2);
        assert_eq!(config.min_interval_ms, 300);
    }
}
