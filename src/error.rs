//! Scheduler error types

use thiserror::Error;

/// Errors produced by the scheduler itself
///
/// Outcomes of submitted operations never appear here: the scheduler
/// forwards them verbatim through the job's handle. These variants cover
/// the only two failures the scheduler can originate, a configuration that
/// could never admit work and a job discarded by `clear()` before it
/// started.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("max_concurrent must be at least 1, got {max_concurrent}")]
    InvalidConcurrency { max_concurrent: usize },

    #[error("job was cleared from the queue before it started")]
    Cleared,
}

impl SchedulerError {
    /// Check whether this is the cleared-before-start error
    pub fn is_cleared(&self) -> bool {
        matches!(self, SchedulerError::Cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = SchedulerError::InvalidConcurrency { max_concurrent: 0 };
        assert_eq!(err.to_string(), "max_concurrent must be at least 1, got 0");

        let err = SchedulerError::Cleared;
        assert_eq!(
            err.to_string(),
            "job was cleared from the queue before it started"
        );
    }

    #[test]
    fn test_is_cleared() {
        assert!(SchedulerError::Cleared.is_cleared());
        assert!(!SchedulerError::InvalidConcurrency { max_concurrent: 0 }.is_cleared());
    }
}
