//! Types for implementing a table of predictors.

/// The largest index width supported by [pc_index].
///
/// The two low bits of an address are always zero for word-aligned
/// instructions, leaving 30 useful bits in a 32-bit address.
pub const MAX_INDEX_BITS: usize = 30;

/// Form an index from the program counter.
///
/// Drops the two low bits of the address and keeps the next `index_bits`
/// bits, i.e. selects bits `[index_bits+1:2]`.
pub fn pc_index(pc: u32, index_bits: usize) -> usize {
    assert!(index_bits >= 1 && index_bits <= MAX_INDEX_BITS,
        "index width {} out of range", index_bits);
    ((pc << (30 - index_bits)) >> (32 - index_bits)) as usize
}

/// Interface to a table of predictors.
pub trait PredictorTable {
    /// The type of entry in the table.
    type Entry: ?Sized;

    /// Returns the number of bits used to index the table.
    fn index_bits(&self) -> usize;

    /// Returns the number of entries in the table.
    fn size(&self) -> usize { 1 << self.index_bits() }

    /// Given a program counter value, return the corresponding index.
    fn get_index(&self, pc: u32) -> usize {
        pc_index(pc, self.index_bits())
    }

    /// Returns a reference to an entry in the table.
    ///
    /// Panics if the index is out of range: indexes are always derived from
    /// the table width, so this is a bug and not a recoverable condition.
    fn get_entry(&self, idx: usize) -> &Self::Entry;

    /// Returns a mutable reference to an entry in the table.
    fn get_entry_mut(&mut self, idx: usize) -> &mut Self::Entry;

    /// Returns a bitmask corresponding to the number of entries in the table.
    fn index_mask(&self) -> usize {
        self.size() - 1
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn drops_the_low_two_bits() {
        assert_eq!(pc_index(0x0000_0004, 4), 1);
        assert_eq!(pc_index(0x0000_0003, 4), 0);
        assert_eq!(pc_index(0x0000_003c, 4), 0xf);
        assert_eq!(pc_index(0x0000_0040, 4), 0);
    }

    #[test]
    fn full_width_index() {
        assert_eq!(pc_index(0xffff_ffff, 30), 0x3fff_ffff);
        assert_eq!(pc_index(0x8000_0000, 1), 0);
        assert_eq!(pc_index(0x0000_0004, 1), 1);
    }

    #[test]
    fn known_addresses() {
        assert_eq!(pc_index(0x1000, 4), 0);
        assert_eq!(pc_index(0x1000, 11), 0x400);
        assert_eq!(pc_index(0x2000, 4), 0);
        assert_eq!(pc_index(0x0040_2a38, 8), 0x8e);
    }

    #[test]
    #[should_panic]
    fn zero_width_is_a_bug() {
        pc_index(0x1000, 0);
    }
}
