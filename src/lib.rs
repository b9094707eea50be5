// SPDX-License-Identifier: Apache-2.0

//! Configuration layer of an OpenTelemetry exporter publishing to Apache Pulsar.
//!
//! A YAML document is decoded onto an explicit defaults record, validated, and
//! projected into the options the broker client and producer consume:
//!
//! ```no_run
//! use pulsar_exporter::init::pulsar_exporter::{default_component_id, load_config_file};
//!
//! let config = load_config_file("config.yaml", &default_component_id())?;
//! let client_options = config.client_options();
//! let producer_options = config.producer_options();
//! # Ok::<(), pulsar_exporter::exporters::pulsar::ConfigError>(())
//! ```

pub mod exporters;
pub mod init;
