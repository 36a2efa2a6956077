//! Ammunition synthesis for key-value load testing.
//!
//! This library turns a target duration and read/write throughput into a
//! deterministic-length stream of synthetic requests, one record per shot,
//! rendered either as a plain line protocol or as raw HTTP/1.1 requests.

#![deny(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io;

use serde::{Deserialize, Serialize};

pub use generator::AmmoGenerator;
pub use http::Http;
pub use plain::Plain;

pub mod classifier;
pub mod common;
pub mod generator;
pub mod http;
pub mod key;
pub mod plain;
pub mod timeline;

/// Errors produced by the ammunition engine.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Both request rates are zero
    #[error("read_rps + write_rps must be greater than zero")]
    ZeroRate,
    /// Data size bounds do not form a half-open interval
    #[error("min_data_size ({min}) must be less than max_data_size ({max})")]
    DataSizeBounds {
        /// Configured minimum payload size
        min: usize,
        /// Configured maximum payload size
        max: usize,
    },
    /// Reads can occur but no read prefixes were supplied
    #[error("read_prefixes must be non-empty when reads can occur")]
    NoReadPrefixes,
    /// The window and rates together produce no requests at all
    #[error("duration * (read_rps + write_rps) must be greater than zero")]
    NoRequests,
    /// A serializer was handed a command it cannot render
    #[error("command `{0}` is not supported by this output format")]
    UnsupportedCommand(Command),
    /// Formatting into a scratch buffer failed
    #[error("formatting failed: {0}")]
    Fmt(#[from] std::fmt::Error),
    /// IO operation failed
    #[error("IO operation failed: {0}")]
    Io(#[from] io::Error),
}

/// Command kinds understood by the serializers.
///
/// `Remove` is a valid serialization target for the plain format but is
/// never produced by the classifier, see [`Direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Store a payload under a key
    Write,
    /// Fetch a key
    Read,
    /// Delete a key
    Remove,
}

impl Command {
    pub(crate) fn word(self) -> &'static str {
        match self {
            Command::Write => "write",
            Command::Read => "read",
            Command::Remove => "remove",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.word())
    }
}

/// The two request kinds the classifier can produce.
///
/// Narrower than [`Command`] on purpose: pattern selection is a total
/// function from this type, so the generation path cannot reach `Remove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// A read request
    Read,
    /// A write request
    Write,
}

impl From<Direction> for Command {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Read => Command::Read,
            Direction::Write => Command::Write,
        }
    }
}

/// Static descriptor shared by every request of one operation kind.
///
/// Two live instances exist per run, one for writes and one for reads, both
/// built once from [`Config`]. Flags and groups are forwarded verbatim into
/// the plain output.
#[derive(Debug, Clone)]
pub struct BulletPattern {
    /// Operation this pattern describes
    pub command: Command,
    /// IO flags, opaque to the engine
    pub ioflags: u32,
    /// Command flags, opaque to the engine
    pub cflags: u64,
    /// Backend group list, forwarded verbatim
    pub groups: String,
}

/// Output format selector.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// The plain line protocol
    Plain,
    /// Raw HTTP/1.1 requests
    Http,
}

/// Configuration of the engine.
///
/// Field names match the original ammo configs so existing files keep
/// working. `duration` is in seconds; emitted time offsets are milliseconds.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Which output format to render
    pub output_type: Format,
    /// Minimum write payload size in bytes, inclusive
    pub min_data_size: usize,
    /// Maximum write payload size in bytes, exclusive
    pub max_data_size: usize,
    /// Read requests per second
    pub read_rps: u64,
    /// Write requests per second
    pub write_rps: u64,
    /// Key prefix for writes. Empty disables writes entirely.
    pub write_prefix: String,
    /// Key prefixes for reads, chosen uniformly per request
    #[serde(default)]
    pub read_prefixes: Vec<String>,
    /// Backend group list, forwarded verbatim into plain output
    #[serde(default)]
    pub groups: String,
    /// Shooting window length in seconds
    pub duration: u64,
    /// Write endpoint to POST to (http only)
    #[serde(default)]
    pub proxy_hand: String,
    /// Target host header value (http only)
    #[serde(default)]
    pub host: String,
    /// Send `Connection: Keep-Alive` instead of `Close` (http only)
    #[serde(default)]
    pub keep_alive: bool,
    /// IO flags attached to write patterns (plain only)
    #[serde(default)]
    pub write_ioflags: u32,
    /// Command flags attached to write patterns (plain only)
    #[serde(default)]
    pub write_cflags: u64,
    /// IO flags attached to read patterns (plain only)
    #[serde(default)]
    pub read_ioflags: u32,
    /// Command flags attached to read patterns (plain only)
    #[serde(default)]
    pub read_cflags: u64,
    /// Seed for random operations. Absent means seed from OS entropy, which
    /// forfeits reproducibility.
    #[serde(default)]
    pub seed: Option<[u8; 32]>,
}

impl Config {
    /// Check the preconditions the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns an error if both rates are zero, if the payload size bounds
    /// are not a half-open interval or if reads can occur without any read
    /// prefix to draw from.
    pub fn validate(&self) -> Result<(), Error> {
        if self.read_rps + self.write_rps == 0 {
            return Err(Error::ZeroRate);
        }
        if self.min_data_size >= self.max_data_size {
            return Err(Error::DataSizeBounds {
                min: self.min_data_size,
                max: self.max_data_size,
            });
        }
        // An empty write prefix forces every request onto the read path
        // regardless of the configured rates.
        let reads_possible = self.read_rps > 0 || self.write_prefix.is_empty();
        if reads_possible && self.read_prefixes.is_empty() {
            return Err(Error::NoReadPrefixes);
        }
        Ok(())
    }
}

/// Generate instances of `Self::Output` from a source of randomness.
pub(crate) trait Generator<'a> {
    type Output: 'a;
    type Error: 'a;

    fn generate<R>(&'a self, rng: &mut R) -> Result<Self::Output, Self::Error>
    where
        R: rand::Rng + ?Sized;
}

#[cfg(test)]
mod test {
    use crate::{Command, Config, Direction, Error, Format};

    fn base_config() -> Config {
        Config {
            output_type: Format::Plain,
            min_data_size: 10,
            max_data_size: 100,
            read_rps: 3,
            write_rps: 1,
            write_prefix: "w".to_string(),
            read_prefixes: vec!["d1".to_string(), "d2".to_string()],
            groups: "1:2".to_string(),
            duration: 60,
            proxy_hand: String::new(),
            host: String::new(),
            keep_alive: false,
            write_ioflags: 0,
            write_cflags: 0,
            read_ioflags: 0,
            read_cflags: 0,
            seed: None,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn zero_rates_rejected() {
        let mut config = base_config();
        config.read_rps = 0;
        config.write_rps = 0;
        assert!(matches!(config.validate(), Err(Error::ZeroRate)));
    }

    #[test]
    fn inverted_size_bounds_rejected() {
        let mut config = base_config();
        config.min_data_size = 100;
        config.max_data_size = 100;
        assert!(matches!(
            config.validate(),
            Err(Error::DataSizeBounds { min: 100, max: 100 })
        ));
    }

    #[test]
    fn missing_read_prefixes_rejected() {
        let mut config = base_config();
        config.read_prefixes.clear();
        assert!(matches!(config.validate(), Err(Error::NoReadPrefixes)));
    }

    #[test]
    fn write_only_config_needs_no_read_prefixes() {
        let mut config = base_config();
        config.read_rps = 0;
        config.read_prefixes.clear();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_write_prefix_still_needs_read_prefixes() {
        // Reads are forced when the write prefix is empty, even with
        // read_rps set to zero.
        let mut config = base_config();
        config.read_rps = 0;
        config.write_prefix.clear();
        config.read_prefixes.clear();
        assert!(matches!(config.validate(), Err(Error::NoReadPrefixes)));
    }

    #[test]
    fn direction_maps_onto_command() {
        assert_eq!(Command::from(Direction::Read), Command::Read);
        assert_eq!(Command::from(Direction::Write), Command::Write);
    }
}
