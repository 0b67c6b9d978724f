//! Implementation of a saturating counter.

use crate::branch::Outcome;

/// Configuration for building a [`SaturatingCounter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaturatingCounterConfig {
    /// Width of the counter in bits
    pub bits: u8,
}
impl SaturatingCounterConfig {
    pub const MAX_BITS: u8 = 8;

    pub fn new(bits: u8) -> Self {
        assert!(bits >= 1 && bits <= Self::MAX_BITS,
            "counter width {} out of range", bits);
        Self { bits }
    }

    /// The largest representable value.
    pub fn max(&self) -> u8 {
        ((1u16 << self.bits) - 1) as u8
    }

    /// The smallest value which predicts 'taken'.
    pub fn threshold(&self) -> u8 {
        1 << (self.bits - 1)
    }

    /// The "weakly not-taken" state every counter starts in.
    pub fn initial(&self) -> u8 {
        self.threshold() - 1
    }

    pub fn build(self) -> SaturatingCounter {
        SaturatingCounter { cfg: self, ctr: self.initial() }
    }
}
impl Default for SaturatingCounterConfig {
    fn default() -> Self { Self::new(2) }
}

/// An N-bit saturating counter used to follow the behavior of a branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaturatingCounter {
    cfg: SaturatingCounterConfig,
    ctr: u8,
}
impl SaturatingCounter {
    /// Returns the raw counter value.
    pub fn value(&self) -> u8 { self.ctr }

    pub fn increment(&mut self) {
        if self.ctr < self.cfg.max() {
            self.ctr += 1;
        }
    }

    pub fn decrement(&mut self) {
        self.ctr = self.ctr.saturating_sub(1);
    }

    /// Returns 'true' when the upper half of the range is occupied.
    pub fn is_upper(&self) -> bool {
        self.ctr >= self.cfg.threshold()
    }

    /// Return the current predicted direction.
    pub fn predict(&self) -> Outcome {
        Outcome::from_bool(self.is_upper())
    }

    /// Move toward 'taken' or 'not-taken' according to the outcome.
    pub fn update(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::T => self.increment(),
            Outcome::N => self.decrement(),
        }
    }

    /// Reset the counter.
    pub fn reset(&mut self) {
        self.ctr = self.cfg.initial();
    }
}
