//! Configuration parsing for the end user. Crashes are most likely to
//! originate from this code, intentionally: every precondition the engine
//! relies on is checked here, before any record is emitted.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

/// Errors produced while loading a configuration file.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Error reading the config file
    #[error("Failed to read config file {path:?}: {source}")]
    ReadFile {
        /// File path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
    /// Error for a serde [`serde_yaml`]
    #[error("Failed to deserialize config: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),
    /// The configuration violates an engine precondition
    #[error(transparent)]
    Invalid(#[from] ammo_payload::Error),
}

/// Read, deserialize and validate a configuration file.
///
/// Accepts YAML and, it being a superset, the JSON files the original ammo
/// generator consumed.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not deserialize or
/// fails [`ammo_payload::Config::validate`].
pub fn load(path: &Path) -> Result<ammo_payload::Config, Error> {
    let contents = fs::read_to_string(path).map_err(|source| Error::ReadFile {
        path: path.to_owned(),
        source,
    })?;
    let config: ammo_payload::Config = serde_yaml::from_str(&contents)?;
    config.validate()?;
    info!(path = %path.display(), "loaded configuration");
    Ok(config)
}
