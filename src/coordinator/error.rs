//! Drain error types

use std::time::Duration;

use thiserror::Error;

/// Errors handed to the coordinator's error sink during a drain
///
/// These never propagate to `register` or `new` callers; the sink is the sole
/// observer of shutdown-time failures.
#[derive(Debug, Error)]
pub enum DrainError {
    /// A cleanup action returned an error. The remaining actions still run.
    #[error("cleanup action {label} failed: {error}")]
    Action { label: String, error: eyre::Report },

    /// The grace period elapsed before every action finished. Reported at
    /// most once per drain; the remaining actions keep running unobserved.
    #[error("drain deadline exceeded after {budget:?}")]
    DeadlineExceeded { budget: Duration },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_error_display() {
        let err = DrainError::Action {
            label: "flush-metrics".to_string(),
            error: eyre::eyre!("connection refused"),
        };
        assert_eq!(
            err.to_string(),
            "cleanup action flush-metrics failed: connection refused"
        );
    }

    #[test]
    fn test_deadline_error_display() {
        let err = DrainError::DeadlineExceeded {
            budget: Duration::from_millis(50),
        };
        assert!(err.to_string().contains("deadline exceeded"));
    }
}
