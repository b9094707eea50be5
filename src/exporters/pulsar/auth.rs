// SPDX-License-Identifier: Apache-2.0

use crate::exporters::pulsar::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How the exporter authenticates against the broker.
///
/// Selected in the document by a single key under `auth`:
///
/// ```yaml
/// auth:
///   tls:
///     cert_file: cert.pem
///     key_file: key.pem
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Authentication {
    #[default]
    None,
    Tls(TlsAuthentication),
    Token(TokenAuthentication),
    Athenz(AthenzAuthentication),
    #[serde(rename = "oauth2")]
    OAuth2(OAuth2Authentication),
}

/// Mutual TLS client certificate
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TlsAuthentication {
    #[serde(deserialize_with = "crate::init::parse::deser_into_string")]
    pub cert_file: String,
    #[serde(deserialize_with = "crate::init::parse::deser_into_string")]
    pub key_file: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenAuthentication {
    #[serde(deserialize_with = "crate::init::parse::deser_into_string")]
    pub token: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AthenzAuthentication {
    #[serde(deserialize_with = "crate::init::parse::deser_into_string")]
    pub provider_domain: String,
    #[serde(deserialize_with = "crate::init::parse::deser_into_string")]
    pub tenant_domain: String,
    #[serde(deserialize_with = "crate::init::parse::deser_into_string")]
    pub tenant_service: String,
    #[serde(deserialize_with = "crate::init::parse::deser_into_string")]
    pub private_key: String,
    #[serde(deserialize_with = "crate::init::parse::deser_into_string")]
    pub key_id: String,
    #[serde(deserialize_with = "crate::init::parse::deser_into_string")]
    pub principal_header: String,
    #[serde(deserialize_with = "crate::init::parse::deser_into_string")]
    pub zts_url: String,
}

/// OAuth2 client-credentials flow
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OAuth2Authentication {
    #[serde(deserialize_with = "crate::init::parse::deser_into_string")]
    pub issuer_url: String,
    #[serde(deserialize_with = "crate::init::parse::deser_into_string")]
    pub client_id: String,
    #[serde(deserialize_with = "crate::init::parse::deser_into_string")]
    pub audience: String,
}

/// Credential handed to the broker client, built from [`Authentication`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientAuthentication {
    Tls { cert_path: String, key_path: String },
    Token(String),
    /// Athenz plugin parameters, keyed the way the broker client expects them
    Athenz(BTreeMap<String, String>),
    /// OAuth2 plugin parameters, keyed the way the broker client expects them
    OAuth2(BTreeMap<String, String>),
}

impl ClientAuthentication {
    pub fn tls(cert_path: impl Into<String>, key_path: impl Into<String>) -> Self {
        ClientAuthentication::Tls {
            cert_path: cert_path.into(),
            key_path: key_path.into(),
        }
    }

    pub fn token(token: impl Into<String>) -> Self {
        ClientAuthentication::Token(token.into())
    }

    /// Name of the broker client authentication plugin
    pub fn plugin_name(&self) -> &'static str {
        match self {
            ClientAuthentication::Tls { .. } => "tls",
            ClientAuthentication::Token(_) => "token",
            ClientAuthentication::Athenz(_) => "athenz",
            ClientAuthentication::OAuth2(_) => "oauth2",
        }
    }
}

fn require(variant: &'static str, field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingAuthField { variant, field });
    }
    Ok(())
}

impl Authentication {
    pub fn kind(&self) -> &'static str {
        match self {
            Authentication::None => "none",
            Authentication::Tls(_) => "tls",
            Authentication::Token(_) => "token",
            Authentication::Athenz(_) => "athenz",
            Authentication::OAuth2(_) => "oauth2",
        }
    }

    /// Check that the selected variant carries every field it needs
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Authentication::None => Ok(()),
            Authentication::Tls(tls) => {
                require("tls", "cert_file", &tls.cert_file)?;
                require("tls", "key_file", &tls.key_file)
            }
            Authentication::Token(token) => require("token", "token", &token.token),
            Authentication::Athenz(athenz) => {
                require("athenz", "provider_domain", &athenz.provider_domain)?;
                require("athenz", "tenant_domain", &athenz.tenant_domain)?;
                require("athenz", "tenant_service", &athenz.tenant_service)?;
                require("athenz", "private_key", &athenz.private_key)?;
                require("athenz", "key_id", &athenz.key_id)?;
                // principal_header is optional
                require("athenz", "zts_url", &athenz.zts_url)
            }
            Authentication::OAuth2(oauth2) => {
                require("oauth2", "issuer_url", &oauth2.issuer_url)?;
                require("oauth2", "client_id", &oauth2.client_id)
            }
        }
    }

    /// Build the broker client credential, or `None` when unauthenticated
    pub fn credential(&self) -> Option<ClientAuthentication> {
        match self {
            Authentication::None => None,
            Authentication::Tls(tls) => Some(ClientAuthentication::tls(
                tls.cert_file.clone(),
                tls.key_file.clone(),
            )),
            Authentication::Token(token) => Some(ClientAuthentication::token(token.token.clone())),
            Authentication::Athenz(athenz) => Some(ClientAuthentication::Athenz(params([
                ("providerDomain", athenz.provider_domain.as_str()),
                ("tenantDomain", athenz.tenant_domain.as_str()),
                ("tenantService", athenz.tenant_service.as_str()),
                ("privateKey", athenz.private_key.as_str()),
                ("keyId", athenz.key_id.as_str()),
                ("principalHeader", athenz.principal_header.as_str()),
                ("ztsUrl", athenz.zts_url.as_str()),
            ]))),
            Authentication::OAuth2(oauth2) => Some(ClientAuthentication::OAuth2(params([
                ("type", "client_credentials"),
                ("issuerUrl", oauth2.issuer_url.as_str()),
                ("clientId", oauth2.client_id.as_str()),
                ("audience", oauth2.audience.as_str()),
            ]))),
        }
    }
}

fn params<const N: usize>(pairs: [(&str, &str); N]) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
