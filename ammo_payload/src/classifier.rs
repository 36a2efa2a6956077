//! Per-request read/write classification.

use crate::Direction;

/// One classified shot: which way it goes and which user it addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shot {
    /// Read or write
    pub direction: Direction,
    /// Synthetic user id
    pub user: u32,
}

/// Decides per request whether it reads or writes and derives a user id.
///
/// Writes are identified by their emission order so downstream tooling can
/// correlate a write with later reads of the same id. Reads address a user
/// drawn uniformly from the ids the whole run will have written.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    read_fraction: f64,
    total_reads: u64,
    writes_enabled: bool,
}

impl Classifier {
    /// Build a classifier from the configured rates.
    ///
    /// A disabled write path (empty write prefix) forces every shot onto
    /// the read path no matter the rates.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(read_rps: u64, write_rps: u64, duration_s: u64, writes_enabled: bool) -> Self {
        let read_fraction = if writes_enabled {
            read_rps as f64 / (read_rps + write_rps) as f64
        } else {
            1.0
        };
        Self {
            read_fraction,
            total_reads: duration_s * read_rps,
            writes_enabled,
        }
    }

    /// Classify request `idx`.
    ///
    /// Reads with no read slots to address (a rounding artifact of the
    /// fraction draw) are demoted to writes rather than emitted with a
    /// nonsense user id.
    #[allow(clippy::cast_possible_truncation)]
    pub fn classify<R>(&self, idx: u64, rng: &mut R) -> Shot
    where
        R: rand::Rng + ?Sized,
    {
        let wants_read = if self.writes_enabled {
            rng.random_bool(self.read_fraction)
        } else {
            true
        };
        if wants_read && self.total_reads > 0 {
            Shot {
                direction: Direction::Read,
                user: rng.random_range(0..self.total_reads) as u32,
            }
        } else {
            Shot {
                direction: Direction::Write,
                user: idx as u32,
            }
        }
    }
}
