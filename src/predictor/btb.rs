//! Branch target buffer (BTB) implementations.
//!
//! The direction predictors only rely on the BTB to answer "is the
//! instruction at this address a branch?" before it is decoded.

use std::collections::VecDeque;

/// Interface to a branch target buffer.
pub trait TargetBuffer {
    fn name(&self) -> &'static str;

    /// Returns 'true' if the instruction at this address is predicted to be
    /// a branch (a BTB hit).
    fn lookup(&self, pc: u32) -> bool;

    /// Update the buffer after the instruction has been resolved.
    fn update(&mut self, pc: u32, is_branch: bool);

    /// Returns the contents of each set (most-recently used first).
    fn contents(&self) -> Vec<Vec<u32>>;
}

/// A set-associative BTB with least-recently-used replacement.
///
/// Only tags are tracked: targets are not modeled.
#[derive(Clone, Debug)]
pub struct SetAssociativeBTB {
    /// Tags in each set, most-recently used at the front
    sets: Vec<VecDeque<u32>>,

    /// Number of ways in each set
    assoc: usize,

    /// Number of bits used to select a set
    set_bits: usize,
}
impl SetAssociativeBTB {
    pub fn new(size: usize, assoc: usize) -> Self {
        assert!(assoc > 0 && size % assoc == 0);
        let num_sets = size / assoc;
        assert!(num_sets.is_power_of_two());
        Self {
            sets: vec![VecDeque::with_capacity(assoc); num_sets],
            assoc,
            set_bits: num_sets.ilog2() as usize,
        }
    }

    pub fn num_sets(&self) -> usize { self.sets.len() }

    fn set_index(&self, pc: u32) -> usize {
        ((pc >> 2) as usize) & (self.sets.len() - 1)
    }

    fn tag(&self, pc: u32) -> u32 {
        (pc >> 2).checked_shr(self.set_bits as u32).unwrap_or(0)
    }
}

impl TargetBuffer for SetAssociativeBTB {
    fn name(&self) -> &'static str { "SetAssociativeBTB" }

    fn lookup(&self, pc: u32) -> bool {
        let tag = self.tag(pc);
        self.sets[self.set_index(pc)].contains(&tag)
    }

    fn update(&mut self, pc: u32, is_branch: bool) {
        let tag = self.tag(pc);
        let assoc = self.assoc;
        let set_idx = self.set_index(pc);
        let set = &mut self.sets[set_idx];
        if let Some(pos) = set.iter().position(|t| *t == tag) {
            if let Some(t) = set.remove(pos) {
                set.push_front(t);
            }
        } else if is_branch {
            if set.len() == assoc {
                set.pop_back();
            }
            set.push_front(tag);
        }
    }

    fn contents(&self) -> Vec<Vec<u32>> {
        self.sets.iter().map(|s| s.iter().copied().collect()).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn misses_until_allocated() {
        let mut btb = SetAssociativeBTB::new(4, 2);
        assert!(!btb.lookup(0x1000));
        btb.update(0x1000, true);
        assert!(btb.lookup(0x1000));
    }

    #[test]
    fn non_branches_are_not_allocated() {
        let mut btb = SetAssociativeBTB::new(4, 2);
        btb.update(0x1000, false);
        assert!(!btb.lookup(0x1000));
    }

    #[test]
    fn evicts_the_least_recently_used_way() {
        // Two sets, two ways: these addresses all map to set 0
        let mut btb = SetAssociativeBTB::new(4, 2);
        btb.update(0x00, true);
        btb.update(0x08, true);
        btb.update(0x00, true);
        btb.update(0x10, true);
        assert!(btb.lookup(0x00));
        assert!(!btb.lookup(0x08));
        assert!(btb.lookup(0x10));
        assert_eq!(btb.contents()[0], vec![0x10 >> 3, 0]);
    }

    #[test]
    fn fully_associative() {
        let mut btb = SetAssociativeBTB::new(2, 2);
        assert_eq!(btb.num_sets(), 1);
        btb.update(0x1234, true);
        assert!(btb.lookup(0x1234));
        assert!(!btb.lookup(0x1238));
    }
}
