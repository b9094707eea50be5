// SPDX-License-Identifier: Apache-2.0
#[cfg(test)]
#[allow(clippy::module_inception)]
mod tests {
    use crate::exporters::pulsar::auth::{
        Authentication, ClientAuthentication, TlsAuthentication, TokenAuthentication,
    };
    use crate::exporters::pulsar::client::ClientOptions;
    use crate::exporters::pulsar::config::{
        BatcherBuilderType, CompressionLevel, CompressionType, Config, HashingScheme, Producer,
    };
    use std::time::Duration;

    fn tls_config() -> Config {
        Config::new("pulsar+ssl://broker.example.com:6651".to_string())
            .with_topic("persistent://public/default/spans".to_string())
            .with_tls_trust_certs_file_path("ca.pem".to_string())
            .with_authentication(Authentication::Tls(TlsAuthentication {
                cert_file: "cert.pem".to_string(),
                key_file: "key.pem".to_string(),
            }))
    }

    #[test]
    fn test_pulsar_config_builder() {
        let config = tls_config().with_encoding("otlp_json".to_string());

        assert_eq!(config.endpoint, "pulsar+ssl://broker.example.com:6651");
        assert_eq!(config.topic, "persistent://public/default/spans");
        assert_eq!(config.encoding, "otlp_json");
        assert_eq!(config.tls_trust_certs_file_path, Some("ca.pem".to_string()));
        assert_eq!(config.authentication.kind(), "tls");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_client_options_tls() {
        let options = tls_config().client_options();

        assert_eq!(
            options,
            ClientOptions {
                url: "pulsar+ssl://broker.example.com:6651".to_string(),
                tls_trust_certs_file_path: Some("ca.pem".to_string()),
                tls_allow_insecure_connection: false,
                authentication: Some(ClientAuthentication::tls("cert.pem", "key.pem")),
                connection_timeout: Duration::from_secs(5),
                operation_timeout: Duration::from_secs(30),
                max_connections_per_broker: 1,
            }
        );
        assert_eq!(options.authentication.unwrap().plugin_name(), "tls");
    }

    #[test]
    fn test_client_options_without_auth() {
        let config = Config::default().with_topic("spans".to_string());
        let options = config.client_options();

        assert_eq!(options.url, "pulsar://localhost:6650");
        assert_eq!(options.tls_trust_certs_file_path, None);
        assert_eq!(options.authentication, None);
    }

    #[test]
    fn test_client_options_token() {
        let config = Config::default()
            .with_topic("spans".to_string())
            .with_authentication(Authentication::Token(TokenAuthentication {
                token: "eyJhbGciOiJIUzI1NiJ9".to_string(),
            }));

        assert_eq!(
            config.client_options().authentication,
            Some(ClientAuthentication::Token(
                "eyJhbGciOiJIUzI1NiJ9".to_string()
            ))
        );
    }

    #[test]
    fn test_client_options_deterministic() {
        let config = tls_config();
        assert_eq!(config.client_options(), config.client_options());
        assert_eq!(config.producer_options(), config.producer_options());
    }

    #[test]
    fn test_producer_options() {
        let producer = Producer {
            max_reconnect_to_broker: Some(5),
            hashing_scheme: HashingScheme::Murmur3_32Hash,
            compression_level: CompressionLevel::Faster,
            compression_type: CompressionType::Lz4,
            max_pending_messages: 500,
            batcher_builder_type: BatcherBuilderType::KeyBased,
            partitions_auto_discovery_interval: Duration::from_secs(30),
            batching_max_publish_delay: Duration::from_millis(5),
            batching_max_messages: 200,
            batching_max_size: 64 * 1024,
            disable_block_if_queue_full: true,
            disable_batching: false,
        };
        let mut config = tls_config().with_producer(producer);
        config.timeout = Duration::from_secs(12);

        let options = config.producer_options();
        assert_eq!(options.topic, "persistent://public/default/spans");
        assert_eq!(options.send_timeout, Duration::from_secs(12));
        assert_eq!(options.max_reconnect_to_broker, Some(5));
        assert_eq!(options.hashing_scheme, HashingScheme::Murmur3_32Hash);
        assert_eq!(options.compression_level, CompressionLevel::Faster);
        assert_eq!(options.compression_type, CompressionType::Lz4);
        assert_eq!(options.max_pending_messages, 500);
        assert_eq!(options.batcher_builder_type, BatcherBuilderType::KeyBased);
        assert_eq!(
            options.partitions_auto_discovery_interval,
            Duration::from_secs(30)
        );
        assert_eq!(options.batching_max_publish_delay, Duration::from_millis(5));
        assert_eq!(options.batching_max_messages, 200);
        assert_eq!(options.batching_max_size, 65536);
        assert!(options.disable_block_if_queue_full);
        assert!(!options.disable_batching);
    }
}
