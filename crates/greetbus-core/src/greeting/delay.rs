use std::time::Duration;

use crate::error::{GreetBusError, Result};
use crate::random::Randomness;

/// Lower bound of the simulated processing time (inclusive).
pub const DEFAULT_MIN_DELAY_MS: u64 = 20;
/// Upper bound of the simulated processing time (exclusive).
pub const DEFAULT_MAX_DELAY_MS: u64 = 100;

/// Half-open millisecond range `[min_ms, max_ms)` for the simulated delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min_ms: u64,
    max_ms: u64,
}

impl DelayRange {
    pub fn new(min_ms: u64, max_ms: u64) -> Result<Self> {
        if min_ms >= max_ms {
            return Err(GreetBusError::BadRequest(format!(
                "delay range must satisfy min < max (got {min_ms}..{max_ms})"
            )));
        }
        Ok(Self { min_ms, max_ms })
    }

    pub fn min_ms(&self) -> u64 {
        self.min_ms
    }

    pub fn max_ms(&self) -> u64 {
        self.max_ms
    }

    /// Draw one delay, independent of any previous draw.
    pub fn sample(&self, rng: &dyn Randomness) -> Duration {
        Duration::from_millis(rng.gen_range(self.min_ms..self.max_ms))
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self {
            min_ms: DEFAULT_MIN_DELAY_MS,
            max_ms: DEFAULT_MAX_DELAY_MS,
        }
    }
}
