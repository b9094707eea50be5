// SPDX-License-Identifier: Apache-2.0

use crate::init::parse::env_fragment;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::{Debug, Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Failure to turn a configuration document into a typed record
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode {component} config: {source}")]
    Invalid {
        component: String,
        source: Box<figment::Error>,
    },
}

impl DecodeError {
    /// Dotted key path of the value that failed to decode, if known
    pub fn key_path(&self) -> Option<String> {
        match self {
            DecodeError::Io { .. } => None,
            DecodeError::Invalid { source, .. } => Some(source.path.join(".")),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid component id {id:?}: {reason}")]
pub struct InvalidComponentId {
    id: String,
    reason: &'static str,
}

/// Identifies one configured component, written `type` or `type/name`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComponentId {
    kind: String,
    name: Option<String>,
}

impl ComponentId {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: None,
        }
    }

    pub fn with_name(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: Some(name.into()),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Prefix of the environment variables overriding this component.
    ///
    /// `pulsar` reads `PULSAR_EXPORTER__<KEY>`, `pulsar/primary` reads
    /// `PULSAR_EXPORTER_PRIMARY__<KEY>`. Nested keys are joined with `__`.
    pub fn env_prefix(&self) -> String {
        match &self.name {
            None => format!("{}_EXPORTER__", env_fragment(&self.kind)),
            Some(name) => format!(
                "{}_EXPORTER_{}__",
                env_fragment(&self.kind),
                env_fragment(name)
            ),
        }
    }
}

impl Display for ComponentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            None => write!(f, "{}", self.kind),
            Some(name) => write!(f, "{}/{}", self.kind, name),
        }
    }
}

fn check_segment(id: &str, segment: &str) -> Result<(), InvalidComponentId> {
    let invalid = |reason| InvalidComponentId {
        id: id.to_string(),
        reason,
    };
    if segment.is_empty() {
        return Err(invalid("type and name must not be empty"));
    }
    // The id is used as a key path, where '.' separates levels
    if segment.contains('.') {
        return Err(invalid("'.' is not allowed"));
    }
    if segment.chars().any(char::is_whitespace) {
        return Err(invalid("whitespace is not allowed"));
    }
    Ok(())
}

impl FromStr for ComponentId {
    type Err = InvalidComponentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            None => {
                check_segment(s, s)?;
                Ok(ComponentId::new(s))
            }
            Some((kind, name)) => {
                check_segment(s, kind)?;
                check_segment(s, name)?;
                if name.contains('/') {
                    return Err(InvalidComponentId {
                        id: s.to_string(),
                        reason: "only one '/' is allowed",
                    });
                }
                Ok(ComponentId::with_name(kind, name))
            }
        }
    }
}

/// A YAML configuration document holding one section per component id.
#[derive(Clone)]
pub struct ConfigDocument {
    figment: Figment,
}

impl Debug for ConfigDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConfigDocument{{")?;
        for meta in self.figment.metadata() {
            write!(f, "{},", meta.name)?;
        }
        write!(f, "}}")
    }
}

impl ConfigDocument {
    /// Parse errors surface when a component is decoded.
    pub fn from_yaml_str(yaml: &str) -> Self {
        Self {
            figment: Figment::from(Yaml::string(yaml)),
        }
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, DecodeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DecodeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(path = %path.display(), "Read configuration document");
        Ok(Self::from_yaml_str(&content))
    }

    /// Overlay the section for `id`, then its environment overrides, onto
    /// `defaults`.
    ///
    /// Keys missing from the section keep their default value. A missing
    /// section yields the defaults unchanged.
    pub fn decode<T>(&self, id: &ComponentId, defaults: T) -> Result<T, DecodeError>
    where
        T: Serialize + DeserializeOwned,
    {
        let env_prefix = id.env_prefix();
        let figment = Figment::from(Serialized::defaults(defaults))
            .merge(self.figment.clone().focus(&id.to_string()))
            .merge(Env::prefixed(&env_prefix).split("__"));

        let decoded = figment.extract::<T>().map_err(|e| DecodeError::Invalid {
            component: id.to_string(),
            source: Box::new(e),
        })?;

        debug!(component = %id, env_prefix = %env_prefix, "Decoded component config");
        Ok(decoded)
    }
}
