//! Types for representing branches and branch outcomes.

/// A branch outcome.
#[repr(u32)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    /// Not taken
    N = 0,
    /// Taken
    T = 1
}

impl Outcome {
    pub fn from_bool(b: bool) -> Self {
        match b {
            true => Self::T,
            false => Self::N,
        }
    }

    /// Returns the outcome as a single history bit.
    pub fn bit(self) -> u32 { self as u32 }

    pub fn is_taken(self) -> bool { matches!(self, Self::T) }
}

impl std::fmt::Debug for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::T => "t",
            Self::N => "n",
        };
        write!(f, "{}", s)
    }
}

impl std::ops::Not for Outcome {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::N => Self::T,
            Self::T => Self::N,
        }
    }
}

impl From<bool> for Outcome {
    fn from(x: bool) -> Self { Self::from_bool(x) }
}
impl From<Outcome> for bool {
    fn from(x: Outcome) -> bool { x.is_taken() }
}

/// A record of one instruction in a trace.
///
/// Traces produced by a real front-end only contain branches, but a record
/// may also describe an instruction that the branch target buffer mistook
/// for a branch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BranchRecord {
    /// The program counter value for this instruction
    pub pc: u32,

    /// Whether or not this instruction is actually a branch
    pub is_branch: bool,

    /// The resolved outcome (always [Outcome::N] for non-branches)
    pub outcome: Outcome,
}
impl BranchRecord {
    pub fn new(pc: u32, outcome: Outcome) -> Self {
        Self { pc, is_branch: true, outcome }
    }

    /// Create a record for an instruction which is not a branch.
    pub fn not_branch(pc: u32) -> Self {
        Self { pc, is_branch: false, outcome: Outcome::N }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn outcome_conversions() {
        assert_eq!(Outcome::from(true), Outcome::T);
        assert_eq!(!Outcome::T, Outcome::N);
        assert_eq!(Outcome::T.bit(), 1);
        assert_eq!(Outcome::N.bit(), 0);
        let b: bool = Outcome::N.into();
        assert!(!b);
    }

    #[test]
    fn non_branch_records_are_not_taken() {
        let r = BranchRecord::not_branch(0x1000);
        assert!(!r.is_branch);
        assert_eq!(r.outcome, Outcome::N);
    }
}
