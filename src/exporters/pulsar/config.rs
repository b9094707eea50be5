// SPDX-License-Identifier: Apache-2.0

use crate::exporters::helper::{self, QueueSettings, RetrySettings};
use crate::exporters::pulsar::auth::Authentication;
use crate::exporters::pulsar::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::warn;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "pulsar://localhost:6650";
pub const DEFAULT_ENCODING: &str = "otlp_proto";

const SUPPORTED_SCHEMES: [&str; 4] = ["pulsar", "pulsar+ssl", "http", "https"];

/// Key hashing scheme used to pick a partition
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashingScheme {
    /// Java `String.hashCode()`, compatible with the Java client
    #[default]
    #[serde(rename = "java_string_hash")]
    JavaStringHash,
    #[serde(rename = "murmur3_32hash")]
    Murmur3_32Hash,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionType {
    #[default]
    None,
    Lz4,
    Zlib,
    Zstd,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionLevel {
    #[default]
    Default,
    Faster,
    Better,
}

/// How the producer groups messages into batches
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatcherBuilderType {
    #[default]
    Default,
    /// Batch messages with the same key together
    KeyBased,
}

impl HashingScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashingScheme::JavaStringHash => "java_string_hash",
            HashingScheme::Murmur3_32Hash => "murmur3_32hash",
        }
    }
}

impl CompressionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionType::None => "none",
            CompressionType::Lz4 => "lz4",
            CompressionType::Zlib => "zlib",
            CompressionType::Zstd => "zstd",
        }
    }
}

impl CompressionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionLevel::Default => "default",
            CompressionLevel::Faster => "faster",
            CompressionLevel::Better => "better",
        }
    }
}

impl BatcherBuilderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatcherBuilderType::Default => "default",
            BatcherBuilderType::KeyBased => "key_based",
        }
    }
}

impl Display for HashingScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Display for CompressionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Display for CompressionLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Display for BatcherBuilderType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Producer tuning passed through to the broker client.
///
/// `partitions_auto_discovery_interval` and `batching_max_publish_delay` are
/// written as integer nanoseconds in the document, not as duration literals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Producer {
    /// Reconnect attempts before giving up, unlimited when unset
    #[serde(rename = "max_reconnect_broker")]
    pub max_reconnect_to_broker: Option<u32>,

    pub hashing_scheme: HashingScheme,

    pub compression_level: CompressionLevel,

    pub compression_type: CompressionType,

    /// Size of the producer's pending message queue
    pub max_pending_messages: usize,

    #[serde(rename = "batch_builder_type")]
    pub batcher_builder_type: BatcherBuilderType,

    #[serde(with = "crate::init::parse::duration_nanos")]
    pub partitions_auto_discovery_interval: Duration,

    #[serde(with = "crate::init::parse::duration_nanos")]
    pub batching_max_publish_delay: Duration,

    pub batching_max_messages: u32,

    /// Maximum batch size in bytes
    pub batching_max_size: u32,

    pub disable_block_if_queue_full: bool,

    pub disable_batching: bool,
}

impl Default for Producer {
    fn default() -> Self {
        Self {
            max_reconnect_to_broker: None,
            hashing_scheme: HashingScheme::default(),
            compression_level: CompressionLevel::default(),
            compression_type: CompressionType::default(),
            max_pending_messages: 1000,
            batcher_builder_type: BatcherBuilderType::default(),
            partitions_auto_discovery_interval: Duration::from_secs(60),
            batching_max_publish_delay: Duration::from_millis(10),
            batching_max_messages: 1000,
            batching_max_size: 128 * 1024,
            disable_block_if_queue_full: false,
            disable_batching: false,
        }
    }
}

/// Configuration for the Pulsar exporter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Timeout for every attempt to send data to the broker
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    #[serde(rename = "retry_on_failure")]
    pub retry: RetrySettings,

    #[serde(rename = "sending_queue")]
    pub queue: QueueSettings,

    /// Broker service URL
    #[serde(deserialize_with = "crate::init::parse::deser_into_string")]
    pub endpoint: String,

    #[serde(deserialize_with = "crate::init::parse::deser_into_string")]
    pub topic: String,

    /// Marshaler used to encode payloads
    #[serde(deserialize_with = "crate::init::parse::deser_into_string")]
    pub encoding: String,

    /// CA bundle used to verify the broker certificate
    #[serde(default, deserialize_with = "crate::init::parse::deser_into_string_opt")]
    pub tls_trust_certs_file_path: Option<String>,

    pub tls_allow_insecure_connection: bool,

    #[serde(rename = "auth")]
    pub authentication: Authentication,

    pub max_connections_per_broker: usize,

    /// Timeout for establishing a TCP connection
    #[serde(with = "humantime_serde")]
    pub connection_timeout: Duration,

    /// Timeout for producer creation and other broker operations
    #[serde(with = "humantime_serde")]
    pub operation_timeout: Duration,

    pub producer: Producer,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: helper::DEFAULT_TIMEOUT,
            retry: RetrySettings::default(),
            queue: QueueSettings::default(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            topic: String::new(),
            encoding: DEFAULT_ENCODING.to_string(),
            tls_trust_certs_file_path: None,
            tls_allow_insecure_connection: false,
            authentication: Authentication::None,
            max_connections_per_broker: 1,
            connection_timeout: Duration::from_secs(5),
            operation_timeout: Duration::from_secs(30),
            producer: Producer::default(),
        }
    }
}

impl Config {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            ..Default::default()
        }
    }

    pub fn with_topic(mut self, topic: String) -> Self {
        self.topic = topic;
        self
    }

    pub fn with_encoding(mut self, encoding: String) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_authentication(mut self, authentication: Authentication) -> Self {
        self.authentication = authentication;
        self
    }

    pub fn with_tls_trust_certs_file_path(mut self, path: String) -> Self {
        self.tls_trust_certs_file_path = Some(path);
        self
    }

    pub fn with_max_connections_per_broker(mut self, max: usize) -> Self {
        self.max_connections_per_broker = max;
        self
    }

    pub fn with_producer(mut self, producer: Producer) -> Self {
        self.producer = producer;
        self
    }

    /// Check semantic constraints, returning the first violation found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_endpoint()?;

        if self.topic.is_empty() {
            return Err(ValidationError::EmptyTopic);
        }

        if self.encoding.is_empty() {
            return Err(ValidationError::EmptyEncoding);
        }

        if self.max_connections_per_broker == 0 {
            return Err(ValidationError::MaxConnectionsPerBroker);
        }

        self.authentication.validate()?;

        helper::validate_timeout(self.timeout)?;
        self.retry.validate()?;
        self.queue.validate()?;

        if self.tls_allow_insecure_connection {
            warn!(
                endpoint = %self.endpoint,
                "Pulsar exporter accepts untrusted broker certificates"
            );
        }

        Ok(())
    }

    /// The endpoint may list several brokers after the scheme, as in
    /// `pulsar://b1:6650,b2:6650`. Each broker must be a valid URL with a host.
    fn validate_endpoint(&self) -> Result<(), ValidationError> {
        if self.endpoint.is_empty() {
            return Err(ValidationError::EmptyEndpoint);
        }

        for broker in broker_urls(&self.endpoint) {
            let url = Url::parse(&broker).map_err(|e| ValidationError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                source: e,
            })?;

            if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
                return Err(ValidationError::UnsupportedScheme {
                    endpoint: self.endpoint.clone(),
                    scheme: url.scheme().to_string(),
                });
            }

            if url.host_str().is_none_or(|h| h.is_empty()) {
                return Err(ValidationError::MissingHost(self.endpoint.clone()));
            }
        }

        Ok(())
    }
}

// Expands a multi-broker service URL into one URL per broker
fn broker_urls(endpoint: &str) -> Vec<String> {
    match endpoint.split_once("://") {
        Some((scheme, hosts)) if hosts.contains(',') => hosts
            .split(',')
            .map(|host| format!("{}://{}", scheme, host))
            .collect(),
        _ => vec![endpoint.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporters::helper::SettingsError;
    use crate::exporters::pulsar::auth::TlsAuthentication;
    use tokio_test::{assert_err, assert_ok};

    fn valid() -> Config {
        Config::default().with_topic("spans".to_string())
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.encoding, DEFAULT_ENCODING);
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.max_connections_per_broker, 1);
        assert_eq!(cfg.connection_timeout, Duration::from_secs(5));
        assert_eq!(cfg.operation_timeout, Duration::from_secs(30));
        assert_eq!(cfg.authentication, Authentication::None);
        assert!(cfg.topic.is_empty());
        assert_eq!(cfg.producer.batching_max_size, 131072);
    }

    #[test]
    fn test_default_requires_topic() {
        assert_eq!(
            Config::default().validate(),
            Err(ValidationError::EmptyTopic)
        );
        assert_ok!(valid().validate());
    }

    #[test]
    fn test_endpoint_schemes() {
        for endpoint in [
            "pulsar://localhost:6650",
            "pulsar+ssl://broker.example.com:6651",
            "http://localhost:8080",
            "https://broker.example.com",
        ] {
            let cfg = Config {
                endpoint: endpoint.to_string(),
                ..valid()
            };
            assert_ok!(cfg.validate(), "{}", endpoint);
        }

        let cfg = Config {
            endpoint: "kafka://localhost:9092".to_string(),
            ..valid()
        };
        let err = assert_err!(cfg.validate());
        assert_eq!(
            err,
            ValidationError::UnsupportedScheme {
                endpoint: "kafka://localhost:9092".to_string(),
                scheme: "kafka".to_string()
            }
        );
        assert_eq!(err.field(), "endpoint");
    }

    #[test]
    fn test_endpoint_malformed() {
        let cfg = Config {
            endpoint: "localhost:6650:bad".to_string(),
            ..valid()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ValidationError::InvalidEndpoint { .. }) | Err(ValidationError::UnsupportedScheme { .. })
        ));

        let cfg = Config {
            endpoint: "not a url".to_string(),
            ..valid()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ValidationError::InvalidEndpoint { .. })
        ));

        let cfg = Config {
            endpoint: String::new(),
            ..valid()
        };
        assert_eq!(cfg.validate(), Err(ValidationError::EmptyEndpoint));
    }

    #[test]
    fn test_endpoint_multiple_brokers() {
        let cfg = Config {
            endpoint: "pulsar://b1:6650,b2:6650".to_string(),
            ..valid()
        };
        assert_ok!(cfg.validate());
        assert_eq!(cfg.client_options().url, "pulsar://b1:6650,b2:6650");

        let cfg = Config {
            endpoint: "pulsar+ssl://b1:6651,b2:6651,b3:6651".to_string(),
            ..valid()
        };
        assert_ok!(cfg.validate());

        let cfg = Config {
            endpoint: "pulsar://b1:6650,b2:bad".to_string(),
            ..valid()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ValidationError::InvalidEndpoint { .. })
        ));

        let cfg = Config {
            endpoint: "pulsar://b1:6650,".to_string(),
            ..valid()
        };
        assert_err!(cfg.validate());
    }

    #[test]
    fn test_max_connections_per_broker_zero() {
        let cfg = valid().with_max_connections_per_broker(0);
        let err = assert_err!(cfg.validate());
        assert_eq!(err, ValidationError::MaxConnectionsPerBroker);
        assert_eq!(err.field(), "max_connections_per_broker");
    }

    #[test]
    fn test_auth_checked() {
        let cfg = valid().with_authentication(Authentication::Tls(TlsAuthentication {
            cert_file: "cert.pem".to_string(),
            key_file: String::new(),
        }));
        let err = assert_err!(cfg.validate());
        assert_eq!(err.field(), "auth.tls.key_file");
    }

    #[test]
    fn test_helper_settings_checked() {
        let mut cfg = valid();
        cfg.queue.queue_size = 0;
        assert_eq!(
            cfg.validate(),
            Err(ValidationError::Settings(SettingsError::QueueSize))
        );

        let mut cfg = valid();
        cfg.timeout = Duration::ZERO;
        let err = assert_err!(cfg.validate());
        assert_eq!(err.field(), "timeout");
    }

    #[test]
    fn test_validate_does_not_mutate() {
        let cfg = valid().with_max_connections_per_broker(0);
        let before = cfg.clone();
        let _ = cfg.validate();
        assert_eq!(cfg, before);
    }

    #[test]
    fn test_enum_strings() {
        assert_eq!(HashingScheme::Murmur3_32Hash.to_string(), "murmur3_32hash");
        assert_eq!(CompressionType::Zstd.to_string(), "zstd");
        assert_eq!(CompressionLevel::Better.to_string(), "better");
        assert_eq!(BatcherBuilderType::KeyBased.to_string(), "key_based");
    }
}
