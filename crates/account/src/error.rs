//! The types of errors that might occur while loading an account.

use litauth_sign::SignError;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Failed to load an [`Account`][crate::Account].
#[derive(Debug, Error)]
pub enum AccountError {
    /// The key source could not provide a usable key.
    #[error("failed to load private key: {0}")]
    Key(#[from] KeyError),
}

/// Failed to load key material from a [`KeySource`][crate::KeySource].
#[derive(Debug, Error)]
pub enum KeyError {
    /// Reading or writing the key file failed.
    #[error("key file {}: {source}", .path.display())]
    Io {
        /// The key file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// No key was provided.
    #[error("private key missing")]
    Empty,
    /// The key was malformed.
    #[error(transparent)]
    Invalid(#[from] SignError),
}

/// Failed to load, save or construct a [`Config`][crate::Config].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the config file failed.
    #[error("config file {}: {source}", .path.display())]
    Io {
        /// The config file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The config file was not valid YAML.
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The network has no known chain id.
    #[error("unknown network `{0}`: specify a chain id")]
    UnknownNetwork(String),
}
