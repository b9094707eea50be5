// SPDX-License-Identifier: Apache-2.0

use crate::exporters::pulsar::auth::ClientAuthentication;
use crate::exporters::pulsar::config::{
    BatcherBuilderType, CompressionLevel, CompressionType, Config, HashingScheme,
};
use std::time::Duration;

/// Connection options for the broker client
#[derive(Clone, Debug, PartialEq)]
pub struct ClientOptions {
    pub url: String,
    pub tls_trust_certs_file_path: Option<String>,
    pub tls_allow_insecure_connection: bool,
    pub authentication: Option<ClientAuthentication>,
    pub connection_timeout: Duration,
    pub operation_timeout: Duration,
    pub max_connections_per_broker: usize,
}

/// Options for the producer publishing to the configured topic
#[derive(Clone, Debug, PartialEq)]
pub struct ProducerOptions {
    pub topic: String,
    pub send_timeout: Duration,
    pub max_reconnect_to_broker: Option<u32>,
    pub hashing_scheme: HashingScheme,
    pub compression_level: CompressionLevel,
    pub compression_type: CompressionType,
    pub max_pending_messages: usize,
    pub batcher_builder_type: BatcherBuilderType,
    pub partitions_auto_discovery_interval: Duration,
    pub batching_max_publish_delay: Duration,
    pub batching_max_messages: u32,
    pub batching_max_size: u32,
    pub disable_block_if_queue_full: bool,
    pub disable_batching: bool,
}

impl Config {
    /// Build the broker client options from this configuration
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            url: self.endpoint.clone(),
            tls_trust_certs_file_path: self.tls_trust_certs_file_path.clone(),
            tls_allow_insecure_connection: self.tls_allow_insecure_connection,
            authentication: self.authentication.credential(),
            connection_timeout: self.connection_timeout,
            operation_timeout: self.operation_timeout,
            max_connections_per_broker: self.max_connections_per_broker,
        }
    }

    /// Build the producer options from this configuration
    pub fn producer_options(&self) -> ProducerOptions {
        let producer = &self.producer;
        ProducerOptions {
            topic: self.topic.clone(),
            send_timeout: self.timeout,
            max_reconnect_to_broker: producer.max_reconnect_to_broker,
            hashing_scheme: producer.hashing_scheme,
            compression_level: producer.compression_level,
            compression_type: producer.compression_type,
            max_pending_messages: producer.max_pending_messages,
            batcher_builder_type: producer.batcher_builder_type,
            partitions_auto_discovery_interval: producer.partitions_auto_discovery_interval,
            batching_max_publish_delay: producer.batching_max_publish_delay,
            batching_max_messages: producer.batching_max_messages,
            batching_max_size: producer.batching_max_size,
            disable_block_if_queue_full: producer.disable_block_if_queue_full,
            disable_batching: producer.disable_batching,
        }
    }
}
