// SPDX-License-Identifier: Apache-2.0

use crate::exporters::helper::SettingsError;
use crate::init::config::DecodeError;
use thiserror::Error;

/// Semantic problems found in a decoded Pulsar exporter configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("endpoint must not be empty")]
    EmptyEndpoint,

    #[error("endpoint {endpoint:?} is not a valid URL: {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },

    #[error(
        "endpoint {endpoint:?} has unsupported scheme {scheme:?}, expected one of pulsar, pulsar+ssl, http, https"
    )]
    UnsupportedScheme { endpoint: String, scheme: String },

    #[error("endpoint {0:?} has no host")]
    MissingHost(String),

    #[error("topic must not be empty")]
    EmptyTopic,

    #[error("encoding must not be empty")]
    EmptyEncoding,

    #[error("max_connections_per_broker must be at least 1")]
    MaxConnectionsPerBroker,

    #[error("auth.{variant}.{field} must not be empty")]
    MissingAuthField {
        variant: &'static str,
        field: &'static str,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl ValidationError {
    /// Document key of the offending field
    pub fn field(&self) -> String {
        match self {
            ValidationError::EmptyEndpoint
            | ValidationError::InvalidEndpoint { .. }
            | ValidationError::UnsupportedScheme { .. }
            | ValidationError::MissingHost(_) => "endpoint".to_string(),
            ValidationError::EmptyTopic => "topic".to_string(),
            ValidationError::EmptyEncoding => "encoding".to_string(),
            ValidationError::MaxConnectionsPerBroker => "max_connections_per_broker".to_string(),
            ValidationError::MissingAuthField { variant, field } => {
                format!("auth.{}.{}", variant, field)
            }
            ValidationError::Settings(e) => match e {
                SettingsError::ZeroTimeout => "timeout".to_string(),
                SettingsError::RandomizationFactor(_) => {
                    "retry_on_failure.randomization_factor".to_string()
                }
                SettingsError::Multiplier(_) => "retry_on_failure.multiplier".to_string(),
                SettingsError::IntervalOrder { .. } => "retry_on_failure.max_interval".to_string(),
                SettingsError::QueueSize => "sending_queue.queue_size".to_string(),
                SettingsError::NumConsumers => "sending_queue.num_consumers".to_string(),
            },
        }
    }
}

/// Either stage of loading a Pulsar exporter configuration can fail
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("invalid Pulsar exporter config: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type for Pulsar exporter configuration
pub type Result<T> = std::result::Result<T, ConfigError>;
