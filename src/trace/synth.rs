//! Generating synthetic traces.
//!
//! A [TraceBuilder] lays out a straight-line sequence of branch sites and
//! executes them in order, over and over. Each site resolves according to
//! its own [BranchPattern].

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::branch::*;

/// A pre-determined pattern of outcomes associated with a conditional branch.
#[derive(Clone, Debug, PartialEq)]
pub enum BranchPattern {
    /// A branch whose outcome is always 'taken'.
    AlwaysTaken,

    /// A branch whose outcome is always 'not-taken'.
    NeverTaken,

    /// A branch whose outcome is only periodically "taken".
    /// Otherwise, the branch is "not-taken" by default.
    TakenPeriodic(usize),

    /// A branch whose outcome is only periodically "not-taken".
    /// Otherwise, the branch is "taken" by default.
    NotTakenPeriodic(usize),

    /// A branch with an arbitrary repeating pattern of outcomes.
    Pattern(Vec<Outcome>),

    /// A branch which is taken with some probability.
    Random(f64),
}
impl BranchPattern {
    /// Given the number of times this branch has executed, generate an
    /// outcome.
    pub fn outcome(&self, ctr: usize, rng: &mut impl Rng) -> Outcome {
        match self {
            Self::AlwaysTaken => Outcome::T,
            Self::NeverTaken => Outcome::N,
            Self::TakenPeriodic(p) => {
                if ctr % p == (p - 1) { Outcome::T } else { Outcome::N }
            },
            Self::NotTakenPeriodic(p) => {
                if ctr % p == (p - 1) { Outcome::N } else { Outcome::T }
            },
            Self::Pattern(p) => p[ctr % p.len()],
            Self::Random(prob) => Outcome::from_bool(rng.gen_bool(*prob)),
        }
    }
}

#[derive(Clone, Debug)]
struct Site {
    pc: u32,
    pattern: BranchPattern,
    ctr: usize,
}

/// Builder for a synthetic trace.
#[derive(Clone, Debug)]
pub struct TraceBuilder {
    sites: Vec<Site>,

    /// Address of the next site
    cursor: u32,

    rng: StdRng,
}
impl TraceBuilder {
    /// Create a builder whose first site is at `base`. The seed makes any
    /// [BranchPattern::Random] sites reproducible.
    pub fn new(base: u32, seed: u64) -> Self {
        Self {
            sites: Vec::new(),
            cursor: base & !0b11,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Add a branch at the current address and return its address.
    pub fn branch(&mut self, pattern: BranchPattern) -> u32 {
        if let BranchPattern::TakenPeriodic(p) | BranchPattern::NotTakenPeriodic(p) = pattern {
            assert!(p > 0, "period must be non-zero");
        }
        if let BranchPattern::Pattern(ref p) = pattern {
            assert!(!p.is_empty(), "pattern must be non-empty");
        }
        let pc = self.cursor;
        self.sites.push(Site { pc, pattern, ctr: 0 });
        self.cursor = self.cursor.wrapping_add(4);
        pc
    }

    /// Increment the address by some number of bytes.
    pub fn pad(&mut self, len: u32) {
        self.cursor = self.cursor.wrapping_add(len) & !0b11;
    }

    /// Increment and align the address to some power of two.
    pub fn pad_align(&mut self, aln: u32) {
        assert!(aln.is_power_of_two());
        let mask = aln - 1;
        self.cursor = self.cursor.wrapping_add(mask) & !mask;
    }

    pub fn num_sites(&self) -> usize { self.sites.len() }

    /// Execute every site in order `iters` times.
    pub fn build(&mut self, iters: usize) -> Vec<BranchRecord> {
        let mut res = Vec::with_capacity(iters * self.sites.len());
        for _ in 0..iters {
            for site in self.sites.iter_mut() {
                let outcome = site.pattern.outcome(site.ctr, &mut self.rng);
                site.ctr += 1;
                res.push(BranchRecord::new(site.pc, outcome));
            }
        }
        res
    }
}

/// Generate a trace of `len` branches drawn from `num_sites` sites with
/// randomly chosen patterns.
pub fn random_trace(seed: u64, num_sites: usize, len: usize) -> Vec<BranchRecord> {
    assert!(num_sites > 0);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut b = TraceBuilder::new(0x0040_0000, rng.gen());
    for _ in 0..num_sites {
        let pattern = match rng.gen_range(0..5) {
            0 => BranchPattern::AlwaysTaken,
            1 => BranchPattern::NeverTaken,
            2 => BranchPattern::TakenPeriodic(rng.gen_range(2..8)),
            3 => BranchPattern::NotTakenPeriodic(rng.gen_range(2..8)),
            _ => BranchPattern::Random(rng.gen_range(0.0..1.0)),
        };
        b.branch(pattern);
        b.pad(rng.gen_range(0..64) * 4);
    }

    let iters = (len + num_sites - 1) / num_sites;
    let mut res = b.build(iters);
    res.truncate(len);
    res
}
