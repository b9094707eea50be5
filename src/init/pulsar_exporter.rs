// SPDX-License-Identifier: Apache-2.0

use crate::exporters::pulsar::config::Config;
use crate::exporters::pulsar::errors::Result;
use crate::init::config::{ComponentId, ConfigDocument};
use std::path::Path;
use tracing::{error, info};

/// Component type of the Pulsar exporter in configuration documents
pub const TYPE_STR: &str = "pulsar";

pub fn default_component_id() -> ComponentId {
    ComponentId::new(TYPE_STR)
}

pub fn create_default_config() -> Config {
    Config::default()
}

/// Decode and validate the exporter section `id` of `document`.
pub fn load_config(document: &ConfigDocument, id: &ComponentId) -> Result<Config> {
    let config = document.decode(id, create_default_config())?;

    if let Err(e) = config.validate() {
        error!(component = %id, field = %e.field(), error = %e, "Invalid Pulsar exporter config");
        return Err(e.into());
    }

    info!(
        component = %id,
        endpoint = %config.endpoint,
        topic = %config.topic,
        auth = config.authentication.kind(),
        timeout = %humantime::format_duration(config.timeout),
        "Loaded Pulsar exporter config"
    );
    Ok(config)
}

pub fn load_config_str(yaml: &str, id: &ComponentId) -> Result<Config> {
    load_config(&ConfigDocument::from_yaml_str(yaml), id)
}

pub fn load_config_file(path: impl AsRef<Path>, id: &ComponentId) -> Result<Config> {
    let document = ConfigDocument::from_yaml_file(path)?;
    load_config(&document, id)
}
