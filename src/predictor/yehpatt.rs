//! A two-level adaptive (Yeh-Patt) predictor.
//!
//! The first level is a [BranchHistoryTable] of per-address local histories.
//! The second level is a [CounterTable] indexed directly by the value of a
//! local history, so branches with the same recent pattern share counters.

use crate::branch::Outcome;
use crate::predictor::*;

#[derive(Clone, Debug)]
pub struct YehPatt {
    bht: BranchHistoryTable,
    pht: CounterTable,
}
impl YehPatt {
    /// Create a predictor with `2^bht_bits` local histories.
    /// Each local history is `pattern_bits` wide and selects one of
    /// `2^pattern_bits` counters.
    pub fn new(bht_bits: usize, pattern_bits: usize,
        cfg: SaturatingCounterConfig) -> Self
    {
        Self {
            bht: BranchHistoryTable::new(bht_bits, pattern_bits),
            pht: CounterTable::new(pattern_bits, cfg),
        }
    }

    /// Returns the pattern table index used for this program counter.
    pub fn index(&self, pc: u32) -> usize {
        self.bht.history(pc)
    }

    pub fn predict(&self, pc: u32) -> Outcome {
        self.pht.predict(self.index(pc))
    }

    pub fn update(&mut self, pc: u32, outcome: Outcome) {
        let idx = self.index(pc);
        self.pht.update(idx, outcome);
        self.bht.update(pc, outcome);
    }

    pub fn history_table(&self) -> &BranchHistoryTable { &self.bht }
    pub fn pattern_table(&self) -> &CounterTable { &self.pht }
}
