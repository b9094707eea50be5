// SPDX-License-Identifier: Apache-2.0

//! Pulsar exporter configuration.
//!
//! This module holds the typed configuration of the exporter that publishes
//! telemetry to Apache Pulsar, along with its validation and the options
//! derived from it for the broker client.
//!
//! # Modules
//!
//! - `config`: Configuration record, producer settings and validation
//! - `auth`: Authentication variants and the client credential built from them
//! - `client`: Client and producer options derived from the configuration
//! - `errors`: Validation and loading errors

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;

#[cfg(test)]
mod tests;

pub use auth::{Authentication, ClientAuthentication};
pub use client::{ClientOptions, ProducerOptions};
pub use config::{Config, Producer};
pub use errors::{ConfigError, ValidationError};
