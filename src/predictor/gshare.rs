//! A gshare predictor: saturating counters indexed by the program counter
//! with global history folded into the high-order index bits.

use crate::branch::Outcome;
use crate::history::HistoryRegister;
use crate::predictor::*;

/// Fold `history_bits` bits of global history into an index.
///
/// The low `index_bits - history_bits` bits of the index are kept as-is,
/// and the high `history_bits` bits are XOR'ed with the history.
pub fn fold_index(base: usize, index_bits: usize, history_bits: usize,
    history: u32) -> usize
{
    assert!(history_bits <= index_bits);
    let tail_bits = index_bits - history_bits;
    let tail = base & ((1 << tail_bits) - 1);
    let head = (base >> tail_bits) ^ (history as usize);
    (head << tail_bits) | tail
}

#[derive(Clone, Debug)]
pub struct Gshare {
    pht: CounterTable,
    ghr: HistoryRegister,
}
impl Gshare {
    pub fn new(index_bits: usize, history_bits: usize,
        cfg: SaturatingCounterConfig) -> Self
    {
        assert!(history_bits >= 1 && history_bits <= index_bits,
            "history width {} must not exceed table width {}",
            history_bits, index_bits);
        Self {
            pht: CounterTable::new(index_bits, cfg),
            ghr: HistoryRegister::new(history_bits),
        }
    }

    /// Returns the table index for this program counter under the current
    /// global history.
    pub fn index(&self, pc: u32) -> usize {
        fold_index(self.pht.get_index(pc), self.pht.index_bits(),
            self.ghr.len(), self.ghr.value())
    }

    pub fn predict(&self, pc: u32) -> Outcome {
        self.pht.predict(self.index(pc))
    }

    /// Train the counter selected by the current global history.
    /// This must happen before the history is advanced.
    pub fn update_table(&mut self, pc: u32, outcome: Outcome) {
        let idx = self.index(pc);
        self.pht.update(idx, outcome);
    }

    /// Advance the global history.
    pub fn update_history(&mut self, outcome: Outcome) {
        self.ghr.update(outcome);
    }

    pub fn update(&mut self, pc: u32, outcome: Outcome) {
        self.update_table(pc, outcome);
        self.update_history(outcome);
    }

    pub fn table(&self) -> &CounterTable { &self.pht }
    pub fn ghr(&self) -> &HistoryRegister { &self.ghr }
}
