//! Implementation of a branch chooser table (BCT) for tournament prediction.

use crate::predictor::*;

/// Identifies one of the two components of a [Hybrid] predictor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Component {
    Bimodal,
    Gshare,
}

/// A table of saturating counters which vote for a [Component].
///
/// A counter in the upper half of its range selects gshare, otherwise
/// bimodal. Counters are not taken/not-taken predictions.
#[derive(Clone, Debug)]
pub struct ChooserTable {
    table: CounterTable,
}
impl ChooserTable {
    pub fn new(index_bits: usize, cfg: SaturatingCounterConfig) -> Self {
        Self { table: CounterTable::new(index_bits, cfg) }
    }

    /// Select the component used to predict the branch at this address.
    pub fn choose(&self, pc: u32) -> Component {
        let idx = self.table.get_index(pc);
        if self.table.get_entry(idx).is_upper() {
            Component::Gshare
        } else {
            Component::Bimodal
        }
    }

    /// Reinforce whichever component was correct.
    ///
    /// Nothing changes when both components agreed on the outcome.
    pub fn update(&mut self, pc: u32, bimodal_hit: bool, gshare_hit: bool) {
        let idx = self.table.get_index(pc);
        let entry = self.table.get_entry_mut(idx);
        match (bimodal_hit, gshare_hit) {
            (false, true) => entry.increment(),
            (true, false) => entry.decrement(),
            _ => {},
        }
    }

    pub fn table(&self) -> &CounterTable { &self.table }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn starts_with_bimodal() {
        let bct = ChooserTable::new(3, SaturatingCounterConfig::default());
        assert_eq!(bct.choose(0x1000), Component::Bimodal);
    }

    #[test]
    fn learns_toward_the_correct_component() {
        let mut bct = ChooserTable::new(3, SaturatingCounterConfig::default());
        bct.update(0x4, false, true);
        assert_eq!(bct.choose(0x4), Component::Gshare);
        assert_eq!(bct.choose(0x8), Component::Bimodal);
        bct.update(0x4, true, false);
        assert_eq!(bct.choose(0x4), Component::Bimodal);
    }

    #[test]
    fn agreement_leaves_the_chooser_alone() {
        let mut bct = ChooserTable::new(2, SaturatingCounterConfig::default());
        bct.update(0x4, true, true);
        bct.update(0x4, false, false);
        assert!(bct.table().values().all(|v| v == 1));
    }
}
