//! Implementation of a pattern history table (PHT).

use crate::branch::Outcome;
use crate::predictor::*;

/// A table of [SaturatingCounter] with `2^index_bits` entries.
///
/// All counters are allocated up front and start in the weakly not-taken
/// state. This is the substrate for every direction predictor.
#[derive(Clone, Debug)]
pub struct CounterTable {
    /// Table of counters
    data: Vec<SaturatingCounter>,

    /// Number of bits used to form an index
    index_bits: usize,
}
impl CounterTable {
    pub fn new(index_bits: usize, cfg: SaturatingCounterConfig) -> Self {
        assert!(index_bits >= 1 && index_bits <= MAX_INDEX_BITS,
            "table width {} out of range", index_bits);
        let data = vec![cfg.build(); 1 << index_bits];
        Self { data, index_bits }
    }

    /// Predict a direction with the counter at `idx`.
    pub fn predict(&self, idx: usize) -> Outcome {
        self.get_entry(idx).predict()
    }

    /// Train the counter at `idx` with the resolved outcome.
    pub fn update(&mut self, idx: usize, outcome: Outcome) {
        self.get_entry_mut(idx).update(outcome);
    }

    /// Returns the raw counter values in index order.
    pub fn values(&self) -> impl Iterator<Item = u8> + '_ {
        self.data.iter().map(|c| c.value())
    }

    pub fn reset(&mut self) {
        self.data.iter_mut().for_each(|c| c.reset());
    }
}

impl PredictorTable for CounterTable {
    type Entry = SaturatingCounter;

    fn index_bits(&self) -> usize { self.index_bits }

    fn get_entry(&self, idx: usize) -> &SaturatingCounter {
        &self.data[idx]
    }

    fn get_entry_mut(&mut self, idx: usize) -> &mut SaturatingCounter {
        &mut self.data[idx]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn table_is_sized_by_index_width() {
        let pht = CounterTable::new(4, SaturatingCounterConfig::default());
        assert_eq!(pht.size(), 16);
        assert_eq!(pht.index_mask(), 0xf);
        assert!(pht.values().all(|v| v == 1));
    }

    #[test]
    fn update_touches_one_counter() {
        let mut pht = CounterTable::new(3, SaturatingCounterConfig::default());
        pht.update(5, Outcome::T);
        let values: Vec<u8> = pht.values().collect();
        assert_eq!(values, vec![1, 1, 1, 1, 1, 2, 1, 1]);
        assert_eq!(pht.predict(5), Outcome::T);
        assert_eq!(pht.predict(4), Outcome::N);
        pht.reset();
        assert!(pht.values().all(|v| v == 1));
    }

    #[test]
    fn address_index_uses_table_width() {
        let pht = CounterTable::new(4, SaturatingCounterConfig::default());
        assert_eq!(pht.get_index(0x0000_0034), 0xd);
    }

    #[test]
    #[should_panic]
    fn out_of_range_index_is_fatal() {
        let pht = CounterTable::new(2, SaturatingCounterConfig::default());
        pht.predict(4);
    }
}
