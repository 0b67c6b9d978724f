//! Implementations of different branch predictors.

pub mod counter;
pub mod table;
pub mod pht;
pub mod bht;
pub mod chooser;
pub mod bimodal;
pub mod gshare;
pub mod hybrid;
pub mod yehpatt;
pub mod btb;

pub use counter::*;
pub use table::*;
pub use pht::*;
pub use bht::*;
pub use chooser::*;
pub use bimodal::*;
pub use gshare::*;
pub use hybrid::*;
pub use yehpatt::*;
pub use btb::*;

use serde::{ Deserialize, Serialize };
use tracing::trace;

use crate::branch::Outcome;
use crate::config::PredictorConfig;

/// The different kinds of direction predictor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictorKind {
    Bimodal,
    Gshare,
    Hybrid,
    YehPatt,
}
impl PredictorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bimodal => "bimodal",
            Self::Gshare => "gshare",
            Self::Hybrid => "hybrid",
            Self::YehPatt => "yehpatt",
        }
    }

    /// Position of this kind in per-kind arrays.
    pub fn slot(&self) -> usize {
        match self {
            Self::Bimodal => 0,
            Self::Gshare => 1,
            Self::Hybrid => 2,
            Self::YehPatt => 3,
        }
    }
}
impl std::fmt::Display for PredictorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
impl From<Component> for PredictorKind {
    fn from(c: Component) -> Self {
        match c {
            Component::Bimodal => Self::Bimodal,
            Component::Gshare => Self::Gshare,
        }
    }
}

/// Container for output from [Predictor::predict].
///
/// Records every vote made while predicting one branch so that the same
/// information is available when the predictor is updated and when the
/// outcome is scored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prediction {
    /// The kind of predictor which made this prediction
    pub kind: PredictorKind,

    /// Whether or not the BTB identified the instruction as a branch
    pub is_branch: bool,

    /// Predicted direction for each [PredictorKind] that voted
    pub votes: [Option<Outcome>; 4],

    /// For [PredictorKind::Hybrid], the component that was selected
    pub provider: Option<Component>,
}
impl Prediction {
    fn new(kind: PredictorKind) -> Self {
        Self { kind, is_branch: true, votes: [None; 4], provider: None }
    }

    /// A prediction for an instruction the BTB did not identify as a branch.
    /// The instruction is implicitly predicted to fall through.
    pub fn not_branch(kind: PredictorKind) -> Self {
        Self { is_branch: false, ..Self::new(kind) }
    }

    fn with_vote(mut self, kind: PredictorKind, outcome: Outcome) -> Self {
        self.votes[kind.slot()] = Some(outcome);
        self
    }

    /// Returns the direction predicted by a particular kind of predictor.
    pub fn vote(&self, kind: PredictorKind) -> Option<Outcome> {
        self.votes[kind.slot()]
    }

    /// Returns the final predicted direction.
    pub fn outcome(&self) -> Outcome {
        self.vote(self.kind).unwrap_or(Outcome::N)
    }

    fn hybrid(&self) -> Option<HybridPrediction> {
        Some(HybridPrediction {
            bimodal: self.vote(PredictorKind::Bimodal)?,
            gshare: self.vote(PredictorKind::Gshare)?,
            provider: self.provider?,
        })
    }
}

/// A direction predictor, owning all of its tables.
#[derive(Clone, Debug)]
pub enum Predictor {
    Bimodal(Bimodal),
    Gshare(Gshare),
    Hybrid(Hybrid),
    YehPatt(YehPatt),
}
impl Predictor {
    /// Build the predictor described by a validated configuration.
    pub fn new(cfg: &PredictorConfig, ctr: SaturatingCounterConfig) -> Self {
        match *cfg {
            PredictorConfig::Bimodal { bimodal_bits } => {
                Self::Bimodal(Bimodal::new(bimodal_bits, ctr))
            },
            PredictorConfig::Gshare { gshare_bits, history_bits } => {
                Self::Gshare(Gshare::new(gshare_bits, history_bits, ctr))
            },
            PredictorConfig::Hybrid {
                chooser_bits, gshare_bits, history_bits, bimodal_bits
            } => {
                Self::Hybrid(Hybrid::new(
                    ChooserTable::new(chooser_bits, ctr),
                    Bimodal::new(bimodal_bits, ctr),
                    Gshare::new(gshare_bits, history_bits, ctr),
                ))
            },
            PredictorConfig::YehPatt { bht_bits, pattern_bits } => {
                Self::YehPatt(YehPatt::new(bht_bits, pattern_bits, ctr))
            },
        }
    }

    pub fn kind(&self) -> PredictorKind {
        match self {
            Self::Bimodal(_) => PredictorKind::Bimodal,
            Self::Gshare(_) => PredictorKind::Gshare,
            Self::Hybrid(_) => PredictorKind::Hybrid,
            Self::YehPatt(_) => PredictorKind::YehPatt,
        }
    }

    /// Predict the direction of the branch at this address.
    pub fn predict(&self, pc: u32) -> Prediction {
        let res = Prediction::new(self.kind());
        let res = match self {
            Self::Bimodal(p) => res.with_vote(PredictorKind::Bimodal, p.predict(pc)),
            Self::Gshare(p) => res.with_vote(PredictorKind::Gshare, p.predict(pc)),
            Self::YehPatt(p) => res.with_vote(PredictorKind::YehPatt, p.predict(pc)),
            Self::Hybrid(p) => {
                let h = p.predict(pc);
                let mut res = res
                    .with_vote(PredictorKind::Bimodal, h.bimodal)
                    .with_vote(PredictorKind::Gshare, h.gshare)
                    .with_vote(PredictorKind::Hybrid, h.outcome());
                res.provider = Some(h.provider);
                res
            },
        };
        trace!(pc = %format!("{:08x}", pc), prediction = ?res.outcome(),
            provider = ?res.provider, "predict");
        res
    }

    /// Update the predictor with the resolved outcome of a branch.
    ///
    /// `prediction` must be the value returned by [Predictor::predict] for
    /// this branch, and no other branch may have been updated in between.
    pub fn update(&mut self, pc: u32, prediction: &Prediction, outcome: Outcome) {
        assert_eq!(prediction.kind, self.kind(),
            "prediction was made by a different kind of predictor");
        match self {
            Self::Bimodal(p) => p.update(pc, outcome),
            Self::Gshare(p) => p.update(pc, outcome),
            Self::YehPatt(p) => p.update(pc, outcome),
            Self::Hybrid(p) => {
                let h = prediction.hybrid()
                    .expect("hybrid prediction is missing component votes");
                p.update(pc, &h, outcome);
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ctr() -> SaturatingCounterConfig { SaturatingCounterConfig::default() }

    #[test]
    fn bimodal_prediction_only_has_one_vote() {
        let p = Predictor::new(&PredictorConfig::Bimodal { bimodal_bits: 4 }, ctr());
        let res = p.predict(0x1000);
        assert_eq!(res.kind, PredictorKind::Bimodal);
        assert_eq!(res.vote(PredictorKind::Bimodal), Some(Outcome::N));
        assert_eq!(res.vote(PredictorKind::Gshare), None);
        assert_eq!(res.provider, None);
    }

    #[test]
    fn hybrid_prediction_records_every_vote() {
        let cfg = PredictorConfig::Hybrid {
            chooser_bits: 3, gshare_bits: 4, history_bits: 2, bimodal_bits: 4,
        };
        let mut p = Predictor::new(&cfg, ctr());
        let res = p.predict(0x1000);
        assert_eq!(res.provider, Some(Component::Bimodal));
        assert_eq!(res.vote(PredictorKind::Hybrid), Some(Outcome::N));
        assert_eq!(res.vote(PredictorKind::YehPatt), None);
        p.update(0x1000, &res, Outcome::T);
        assert_eq!(p.predict(0x1000).outcome(), Outcome::T);
    }

    #[test]
    #[should_panic]
    fn update_with_foreign_prediction() {
        let mut p = Predictor::new(&PredictorConfig::Bimodal { bimodal_bits: 4 }, ctr());
        let res = Prediction::new(PredictorKind::Gshare);
        p.update(0x1000, &res, Outcome::T);
    }
}
