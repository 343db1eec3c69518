//! Persisted settings: which network to sign in to, and where the key lives.
//!
//! Everything is stored beneath a `.litauth` directory within a root
//! directory (typically the working directory):
//!
//! - `.litauth/config.yml`: the [`Config`], as YAML.
//! - `.litauth/keyfile`: the hex-encoded private key. See [`KeyFile`].

use crate::{error::ConfigError, key::KeyFile};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// The directory beneath the root that holds all litauth state.
pub const DIR: &str = ".litauth";

/// Networks with a well known chain id.
pub const NETWORKS: [(&str, &str); 3] = [("ethereum", "1"), ("polygon", "137"), ("mumbai", "80001")];

/// Network settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Name of the network, e.g. `ethereum`.
    pub network: String,
    /// Decimal chain id placed in every challenge.
    pub chain_id: String,
}

/// Look up the chain id of a known network.
pub fn chain_id_for(network: &str) -> Option<&'static str> {
    NETWORKS
        .iter()
        .find(|(name, _)| *name == network)
        .map(|(_, id)| *id)
}

impl Config {
    /// Settings for a known network.
    pub fn new(network: &str) -> Result<Self, ConfigError> {
        let chain_id =
            chain_id_for(network).ok_or_else(|| ConfigError::UnknownNetwork(network.to_string()))?;
        Ok(Self::with_chain_id(network, chain_id))
    }

    /// Settings for any network with an explicit chain id.
    pub fn with_chain_id(network: impl Into<String>, chain_id: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            chain_id: chain_id.into(),
        }
    }

    /// The path of the config file beneath `root`.
    pub fn path(root: &Path) -> PathBuf {
        root.join(DIR).join("config.yml")
    }

    /// The key file beneath `root`.
    pub fn key_file(root: &Path) -> KeyFile {
        KeyFile::new(root.join(DIR).join("keyfile"))
    }

    /// Whether both the config file and key file exist beneath `root`.
    pub fn is_initialized(root: &Path) -> bool {
        Self::path(root).is_file() && Self::key_file(root).path().is_file()
    }

    /// Load the config stored beneath `root`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = Self::path(root);
        let yaml = fs::read_to_string(&path).map_err(|source| ConfigError::Io { path, source })?;
        Ok(serde_yaml::from_str(&yaml)?)
    }

    /// Save the config beneath `root`, creating the directory if needed.
    pub fn save(&self, root: &Path) -> Result<(), ConfigError> {
        let path = Self::path(root);
        let yaml = serde_yaml::to_string(self)?;
        let io_err = |source| ConfigError::Io {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(root.join(DIR)).map_err(io_err)?;
        fs::write(&path, yaml).map_err(io_err)?;
        Ok(())
    }
}
