use crate::constants::{
    env, topology, DEFAULT_MARKER_PATH, DEFAULT_SNAPSHOT_PATH, NO_CLUSTER_ID, PATH_DELIMITER,
};
use crate::error::{DiscoveryError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Runtime configuration for the health generator and its default collector.
///
/// Sources are layered: struct defaults, then an optional TOML file, then
/// `DISCOVERY_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub marker_path: PathBuf,
    pub snapshot_path: PathBuf,
    pub cluster_id: Option<String>,
    pub site_id: String,
    pub rack_id: String,
    pub node_id: String,
    pub environment: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            marker_path: PathBuf::from(DEFAULT_MARKER_PATH),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            cluster_id: None,
            site_id: topology::DEFAULT_SITE_ID.to_string(),
            rack_id: topology::DEFAULT_RACK_ID.to_string(),
            node_id: topology::DEFAULT_NODE_ID.to_string(),
            environment: "development".to_string(),
        }
    }
}

impl DiscoveryConfig {
    /// Load defaults, then `file` (if given), then the environment
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            debug!(file = %path.display(), "Loading discovery configuration file");
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        let config: Self = builder
            .add_source(config::Environment::with_prefix(env::CONFIG_PREFIX))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `DISCOVERY_*` environment variables only
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Id of the tree root: the configured cluster or the synthetic root
    pub fn root_id(&self) -> &str {
        self.cluster_id.as_deref().unwrap_or(NO_CLUSTER_ID)
    }

    pub fn validate(&self) -> Result<()> {
        if self.marker_path.as_os_str().is_empty() {
            return Err(DiscoveryError::configuration("marker_path must not be empty"));
        }
        if self.snapshot_path.as_os_str().is_empty() {
            return Err(DiscoveryError::configuration("snapshot_path must not be empty"));
        }
        if self.marker_path == self.snapshot_path {
            return Err(DiscoveryError::configuration(
                "marker_path and snapshot_path must differ",
            ));
        }

        let ids = [
            ("cluster_id", self.root_id()),
            ("site_id", self.site_id.as_str()),
            ("rack_id", self.rack_id.as_str()),
            ("node_id", self.node_id.as_str()),
        ];
        for (field, id) in ids {
            if id.is_empty() {
                return Err(DiscoveryError::configuration(format!(
                    "{field} must not be empty"
                )));
            }
            if id.contains(PATH_DELIMITER) {
                return Err(DiscoveryError::configuration(format!(
                    "{field} '{id}' contains reserved delimiter '{PATH_DELIMITER}'"
                )));
            }
        }

        Ok(())
    }
}
