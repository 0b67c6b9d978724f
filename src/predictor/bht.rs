//! Implementation of a branch history table (BHT) of local histories.

use bitvec::prelude::*;
use crate::branch::Outcome;
use crate::history::shift_in;
use crate::predictor::*;

/// A table of per-address history registers.
///
/// Every entry exists from construction: the histories are packed into a
/// single bit vector and entry `i` occupies bits `[i*h, (i+1)*h)`.
#[derive(Clone, Debug)]
pub struct BranchHistoryTable {
    data: BitVec<u32, Lsb0>,

    /// Number of bits used to form an index
    index_bits: usize,

    /// Width of each local history register
    history_bits: usize,
}
impl BranchHistoryTable {
    pub fn new(index_bits: usize, history_bits: usize) -> Self {
        assert!(index_bits >= 1 && index_bits <= MAX_INDEX_BITS,
            "table width {} out of range", index_bits);
        assert!(history_bits >= 1 && history_bits <= 32,
            "history width {} out of range", history_bits);
        Self {
            data: bitvec![u32, Lsb0; 0; (1 << index_bits) * history_bits],
            index_bits,
            history_bits,
        }
    }

    pub fn history_bits(&self) -> usize { self.history_bits }

    /// Returns the local history associated with this program counter.
    pub fn history(&self, pc: u32) -> usize {
        let idx = self.get_index(pc);
        self.get_entry(idx).load_le::<u32>() as usize
    }

    /// Shift the outcome into the local history for this program counter.
    pub fn update(&mut self, pc: u32, outcome: Outcome) {
        let idx = self.get_index(pc);
        shift_in(self.get_entry_mut(idx), outcome);
    }

    /// Returns every local history in index order.
    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.data.chunks_exact(self.history_bits).map(|h| h.load_le::<u32>())
    }
}

impl PredictorTable for BranchHistoryTable {
    type Entry = BitSlice<u32, Lsb0>;

    fn index_bits(&self) -> usize { self.index_bits }

    fn get_entry(&self, idx: usize) -> &BitSlice<u32, Lsb0> {
        assert!(idx < self.size(), "BHT index {} out of range", idx);
        let start = idx * self.history_bits;
        &self.data[start..start + self.history_bits]
    }

    fn get_entry_mut(&mut self, idx: usize) -> &mut BitSlice<u32, Lsb0> {
        assert!(idx < self.size(), "BHT index {} out of range", idx);
        let start = idx * self.history_bits;
        &mut self.data[start..start + self.history_bits]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn histories_are_independent_per_address() {
        let mut bht = BranchHistoryTable::new(2, 3);
        bht.update(0x0, Outcome::T);
        bht.update(0x0, Outcome::T);
        bht.update(0x4, Outcome::T);
        assert_eq!(bht.history(0x0), 0b011);
        assert_eq!(bht.history(0x4), 0b001);
        assert_eq!(bht.history(0x8), 0);
        let values: Vec<u32> = bht.values().collect();
        assert_eq!(values, vec![0b011, 0b001, 0, 0]);
    }

    #[test]
    fn local_history_is_truncated() {
        let mut bht = BranchHistoryTable::new(1, 2);
        for o in [Outcome::T, Outcome::T, Outcome::N] {
            bht.update(0x0, o);
        }
        assert_eq!(bht.history(0x0), 0b10);
        // The neighboring entry is not clobbered by the shift
        assert_eq!(bht.history(0x4), 0);
    }
}
