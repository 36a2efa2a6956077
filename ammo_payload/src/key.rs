//! Request key synthesis.

use rand::seq::IndexedRandom;

use crate::{Direction, Error};

/// Builds request keys of the form `"<user_id>.<prefix>"`.
///
/// The separator is a literal `.`, the format the original config-driven
/// ammo files used. Writes always use the one configured write prefix;
/// reads draw a prefix uniformly, with replacement, per request.
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    write_prefix: String,
    read_prefixes: Vec<String>,
}

impl KeyGenerator {
    /// Construct from the configured prefixes.
    #[must_use]
    pub fn new(write_prefix: String, read_prefixes: Vec<String>) -> Self {
        Self {
            write_prefix,
            read_prefixes,
        }
    }

    /// Build the key for one shot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoReadPrefixes`] if a read arrives with an empty
    /// prefix list. Validation rejects such configurations before the loop
    /// starts, so hitting this is a defect.
    pub fn make_key<R>(&self, user: u32, direction: Direction, rng: &mut R) -> Result<String, Error>
    where
        R: rand::Rng + ?Sized,
    {
        let prefix = match direction {
            Direction::Write => &self.write_prefix,
            Direction::Read => self
                .read_prefixes
                .choose(rng)
                .ok_or(Error::NoReadPrefixes)?,
        };
        Ok(format!("{user}.{prefix}"))
    }
}
