//! Maps request indices onto time offsets within the shooting window.

use std::num::NonZeroU64;

/// Spreads `total_requests` shots evenly across a duration.
///
/// Offsets are milliseconds from the start of the window. Holding the
/// request count as [`NonZeroU64`] makes the divide-by-zero configuration
/// error unrepresentable here; callers reject the zero-rate case up front.
#[derive(Debug, Clone, Copy)]
pub struct Timeline {
    duration_ms: u64,
    total_requests: NonZeroU64,
}

impl Timeline {
    /// Create a timeline over `duration_ms` milliseconds.
    #[must_use]
    pub fn new(duration_ms: u64, total_requests: NonZeroU64) -> Self {
        Self {
            duration_ms,
            total_requests,
        }
    }

    /// Offset in milliseconds of request `idx`, `floor(duration * idx / N)`.
    ///
    /// Non-decreasing in `idx`; for `idx < N` the result is strictly below
    /// the window length. The product is taken in `u128` so large windows
    /// and indices cannot overflow.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn offset(&self, idx: u64) -> u64 {
        let wide = u128::from(self.duration_ms) * u128::from(idx);
        // Quotient is below duration_ms whenever idx < total_requests, so
        // the narrowing is exact.
        (wide / u128::from(self.total_requests.get())) as u64
    }
}
