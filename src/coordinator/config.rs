//! Coordinator configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Coordinator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Grace period for the whole drain in milliseconds
    ///
    /// Bounds total drain wall-clock time, not individual actions. Zero means
    /// no grace period: the deadline fires as soon as draining begins.
    #[serde(default = "default_grace_period_ms")]
    pub grace_period_ms: u64,
}

fn default_grace_period_ms() -> u64 {
    debug!("default_grace_period_ms: called");
    5_000
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        debug!("CoordinatorConfig::default: called");
        Self {
            grace_period_ms: 5_000,
        }
    }
}

impl CoordinatorConfig {
    /// Get the grace period as a Duration
    pub fn grace_period(&self) -> Duration {
        debug!(grace_period_ms = %self.grace_period_ms, "CoordinatorConfig::grace_period: called");
        Duration::from_millis(self.grace_period_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CoordinatorConfig::default();
        assert_eq!(config.grace_period_ms, 5_000);
    }

    #[test]
    fn test_grace_period_duration() {
        let config = CoordinatorConfig { grace_period_ms: 250 };
        assert_eq!(config.grace_period(), Duration::from_millis(250));
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: CoordinatorConfig = serde_json::from_str("{}").expect("valid config");
        assert_eq!(config.grace_period_ms, 5_000);
    }

    #[test]
    fn test_deserialize_explicit_value() {
        let config: CoordinatorConfig =
            serde_json::from_str(r#"{"grace_period_ms": 100}"#).expect("valid config");
        assert_eq!(config.grace_period(), Duration::from_millis(100));
    }
}
