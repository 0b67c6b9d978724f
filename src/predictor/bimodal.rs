//! A bimodal predictor: saturating counters indexed by the program counter.

use crate::branch::Outcome;
use crate::predictor::*;

#[derive(Clone, Debug)]
pub struct Bimodal {
    pht: CounterTable,
}
impl Bimodal {
    pub fn new(index_bits: usize, cfg: SaturatingCounterConfig) -> Self {
        Self { pht: CounterTable::new(index_bits, cfg) }
    }

    pub fn predict(&self, pc: u32) -> Outcome {
        self.pht.predict(self.pht.get_index(pc))
    }

    pub fn update(&mut self, pc: u32, outcome: Outcome) {
        let idx = self.pht.get_index(pc);
        self.pht.update(idx, outcome);
    }

    pub fn table(&self) -> &CounterTable { &self.pht }
}
