//! Cycling engine configuration

use serde::Deserialize;
use std::time::Duration;

use crate::application::handlers::cycle::{AdvanceCycleConfig, EngineMode};

use super::error::ValidationError;

/// Cycling engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// `cycling` advances on `GET /`, `simple` lists articles there
    #[serde(default)]
    pub mode: EngineMode,

    /// Hold each advance until the previous article is acknowledged
    #[serde(default)]
    pub consumption_gating: bool,

    /// Longest an advance waits for an acknowledgment, in milliseconds
    #[serde(default = "default_consumption_wait")]
    pub consumption_wait_ms: u64,

    /// Interval between acknowledgment checks, in milliseconds
    #[serde(default = "default_consumption_poll")]
    pub consumption_poll_ms: u64,

    /// Read-modify-write attempts per advance
    #[serde(default = "default_max_write_attempts")]
    pub max_write_attempts: u32,

    /// Cycles kept in the article map
    #[serde(default = "default_retained_cycles")]
    pub retained_cycles: u64,
}

impl EngineConfig {
    pub fn consumption_wait(&self) -> Duration {
        Duration::from_millis(self.consumption_wait_ms)
    }

    pub fn consumption_poll(&self) -> Duration {
        Duration::from_millis(self.consumption_poll_ms)
    }

    /// Settings for the advance handler
    pub fn advance_config(&self) -> AdvanceCycleConfig {
        AdvanceCycleConfig {
            consumption_gating: self.consumption_gating,
            consumption_wait: self.consumption_wait(),
            consumption_poll: self.consumption_poll(),
            max_write_attempts: self.max_write_attempts,
            retained_cycles: self.retained_cycles,
        }
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_write_attempts == 0 {
            return Err(ValidationError::InvalidEngineSetting("max_write_attempts must be at least 1"));
        }
        if self.retained_cycles == 0 {
            return Err(ValidationError::InvalidEngineSetting("retained_cycles must be at least 1"));
        }
        if self.consumption_gating {
            if self.consumption_poll_ms == 0 {
                return Err(ValidationError::InvalidEngineSetting(
                    "consumption_poll_ms must be positive",
                ));
            }
            if self.consumption_poll_ms > self.consumption_wait_ms {
                return Err(ValidationError::InvalidEngineSetting(
                    "consumption_poll_ms exceeds consumption_wait_ms",
                ));
            }
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: EngineMode::default(),
            consumption_gating: false,
            consumption_wait_ms: default_consumption_wait(),
            consumption_poll_ms: default_consumption_poll(),
            max_write_attempts: default_max_write_attempts(),
            retained_cycles: default_retained_cycles(),
        }
    }
}

fn default_consumption_wait() -> u64 {
    10_000
}

fn default_consumption_poll() -> u64 {
    1_000
}

fn default_max_write_attempts() -> u32 {
    3
}

fn default_retained_cycles() -> u64 {
    2
}
