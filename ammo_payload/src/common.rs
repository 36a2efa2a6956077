//! Random alphanumeric payload synthesis.

use std::ops::Range;

use crate::{Error, Generator};

/// The 62-symbol alphabet every payload byte is drawn from.
pub(crate) const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Random alphanumeric strings with length uniform in a half-open range.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct AsciiString {
    min_length: usize,
    max_length: usize,
}

impl AsciiString {
    /// `range` must be non-empty, callers validate via [`crate::Config`].
    pub(crate) fn with_length_range(range: Range<usize>) -> Self {
        debug_assert!(range.start < range.end);
        Self {
            min_length: range.start,
            max_length: range.end,
        }
    }
}

impl<'a> Generator<'a> for AsciiString {
    type Output = String;
    type Error = Error;

    fn generate<R>(&'a self, rng: &mut R) -> Result<Self::Output, Self::Error>
    where
        R: rand::Rng + ?Sized,
    {
        let len = rng.random_range(self.min_length..self.max_length);
        let mut s = String::with_capacity(len);
        for _ in 0..len {
            let idx = rng.random_range(0..CHARSET.len());
            s.push(char::from(CHARSET[idx]));
        }
        Ok(s)
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::SmallRng};

    use super::{AsciiString, CHARSET};
    use crate::Generator;

    #[test]
    fn charset_is_62_distinct_symbols() {
        assert_eq!(CHARSET.len(), 62);
        let mut sorted = CHARSET.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 62);
    }

    // Length stays within the half-open range and every byte comes from the
    // alphabet.
    proptest! {
        #[test]
        fn payload_within_bounds(seed: u64, min in 0usize..512, span in 1usize..512) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let max = min + span;
            let ascii = AsciiString::with_length_range(min..max);

            let payload = ascii.generate(&mut rng).unwrap();
            prop_assert!(payload.len() >= min);
            prop_assert!(payload.len() < max);
            for byte in payload.bytes() {
                prop_assert!(CHARSET.contains(&byte));
            }
        }
    }
}
