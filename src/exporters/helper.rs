// SPDX-License-Identifier: Apache-2.0

//! Settings consumed by the generic exporter pipeline: the per-request
//! timeout, retry with exponential backoff, and the sending queue.
//!
//! The pipeline itself lives outside this crate; these types only carry and
//! check the values handed to it.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default jitter applied to each backoff interval.
pub const DEFAULT_RANDOMIZATION_FACTOR: f64 = 0.5;

/// Default growth factor between consecutive backoff intervals.
pub const DEFAULT_MULTIPLIER: f64 = 1.5;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("timeout must be greater than zero")]
    ZeroTimeout,

    #[error("retry_on_failure.randomization_factor must be between 0 and 1, got {0}")]
    RandomizationFactor(f64),

    #[error("retry_on_failure.multiplier must be at least 1, got {0}")]
    Multiplier(f64),

    #[error("retry_on_failure.max_interval ({max}) is shorter than initial_interval ({initial})")]
    IntervalOrder { initial: String, max: String },

    #[error("sending_queue.queue_size must be positive when the queue is enabled")]
    QueueSize,

    #[error("sending_queue.num_consumers must be positive when the queue is enabled")]
    NumConsumers,
}

pub fn validate_timeout(timeout: Duration) -> Result<(), SettingsError> {
    if timeout.is_zero() {
        return Err(SettingsError::ZeroTimeout);
    }
    Ok(())
}

/// Exponential backoff parameters for failed exports
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySettings {
    pub enabled: bool,

    #[serde(with = "humantime_serde")]
    pub initial_interval: Duration,

    #[serde(with = "humantime_serde")]
    pub max_interval: Duration,

    /// Total time spent retrying a batch before it is dropped
    #[serde(with = "humantime_serde")]
    pub max_elapsed_time: Duration,

    pub randomization_factor: f64,

    pub multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            initial_interval: Duration::from_secs(5),
            max_interval: Duration::from_secs(30),
            max_elapsed_time: Duration::from_secs(300),
            randomization_factor: DEFAULT_RANDOMIZATION_FACTOR,
            multiplier: DEFAULT_MULTIPLIER,
        }
    }
}

impl RetrySettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.enabled {
            return Ok(());
        }

        if !(0.0..=1.0).contains(&self.randomization_factor) {
            return Err(SettingsError::RandomizationFactor(
                self.randomization_factor,
            ));
        }

        // NaN fails this comparison as well
        if !(self.multiplier >= 1.0) {
            return Err(SettingsError::Multiplier(self.multiplier));
        }

        if self.max_interval < self.initial_interval {
            return Err(SettingsError::IntervalOrder {
                initial: humantime::format_duration(self.initial_interval).to_string(),
                max: humantime::format_duration(self.max_interval).to_string(),
            });
        }

        Ok(())
    }
}

/// In-memory queue buffering batches ahead of the exporter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueueSettings {
    pub enabled: bool,

    /// Number of workers draining the queue
    pub num_consumers: usize,

    /// Maximum number of batches held in the queue
    pub queue_size: usize,
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            num_consumers: 10,
            queue_size: 1000,
        }
    }
}

impl QueueSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.enabled {
            return Ok(());
        }
        if self.queue_size == 0 {
            return Err(SettingsError::QueueSize);
        }
        if self.num_consumers == 0 {
            return Err(SettingsError::NumConsumers);
        }
        Ok(())
    }
}
