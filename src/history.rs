//! Branch history registers.

use bitvec::prelude::*;
use crate::branch::Outcome;

/// Shift an outcome into some slice of history bits.
///
/// Bit 0 is the newest outcome. Every other bit moves up by one position
/// and the most-significant bit is discarded.
pub fn shift_in(bits: &mut BitSlice<u32, Lsb0>, outcome: Outcome) {
    bits.shift_right(1);
    bits.set(0, outcome.into());
}

/// A fixed-width shift register recording the most recent branch outcomes.
///
/// Used as the global history register (GHR) for gshare, where it is shared
/// by every branch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRegister {
    data: BitVec<u32, Lsb0>,
}

// NOTE: This *reverses* the bits and presents them in a format where the
// leftmost bit is the most-significant (oldest) and the rightmost bit is the
// least-significant (newest).
impl std::fmt::Display for HistoryRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let x: String = self.data.iter().by_vals()
            .map(|b| if b { '1' } else { '0' })
            .rev()
            .collect();
        write!(f, "{}", x)
    }
}

impl HistoryRegister {
    /// Create a register with the specified length in bits.
    /// All bits in the register are initialized to zero.
    pub fn new(len: usize) -> Self {
        assert!(len > 0 && len <= 32, "history width {} out of range", len);
        Self { data: bitvec![u32, Lsb0; 0; len] }
    }

    /// Returns the width of the register in bits.
    pub fn len(&self) -> usize { self.data.len() }

    /// Returns the contents of the register as an unsigned integer.
    pub fn value(&self) -> u32 { self.data.load_le::<u32>() }

    /// Shift the newest outcome into the register.
    pub fn update(&mut self, outcome: Outcome) {
        shift_in(&mut self.data, outcome);
    }

    /// Clear all history bits.
    pub fn reset(&mut self) {
        self.data.fill(false);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_register_is_zero() {
        let ghr = HistoryRegister::new(4);
        assert_eq!(ghr.value(), 0);
        assert_eq!(ghr.len(), 4);
        assert_eq!(ghr.to_string(), "0000");
    }

    #[test]
    fn newest_outcome_is_lsb() {
        let mut ghr = HistoryRegister::new(4);
        ghr.update(Outcome::T);
        assert_eq!(ghr.value(), 0b0001);
        ghr.update(Outcome::N);
        assert_eq!(ghr.value(), 0b0010);
        ghr.update(Outcome::T);
        assert_eq!(ghr.value(), 0b0101);
        assert_eq!(ghr.to_string(), "0101");
    }

    #[test]
    fn oldest_bits_are_discarded() {
        let mut ghr = HistoryRegister::new(2);
        for _ in 0..5 {
            ghr.update(Outcome::T);
        }
        assert_eq!(ghr.value(), 0b11);
        ghr.update(Outcome::N);
        assert_eq!(ghr.value(), 0b10);
        ghr.reset();
        assert_eq!(ghr.value(), 0);
    }
}
