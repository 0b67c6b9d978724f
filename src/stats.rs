//! Helpers for collecting statistics.

use serde::{ Deserialize, Serialize };

use crate::branch::*;
use crate::predictor::{ Prediction, PredictorKind };

/// Container for recording statistics while evaluating a predictor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of instructions which were actually branches
    pub num_branches: u64,

    /// Number of predictions made by the direction predictor
    pub num_predictions: u64,

    /// Number of direction mispredictions, indexed by [PredictorKind::slot]
    pub mispredictions: [u64; 4],

    /// Number of times the BTB disagreed about an instruction being a branch
    pub btb_mispredictions: u64,
}
impl Stats {
    pub fn new() -> Self { Self::default() }

    /// Record the result of a single prediction.
    ///
    /// Only the slots which belong to the configured predictor are touched.
    /// For a hybrid predictor a miss is also charged to the component which
    /// provided the prediction.
    pub fn record(&mut self, prediction: &Prediction, record: &BranchRecord) {
        if record.is_branch {
            self.num_branches += 1;
        }
        if prediction.is_branch != record.is_branch {
            self.btb_mispredictions += 1;
        }
        if !prediction.is_branch {
            return;
        }
        self.num_predictions += 1;

        let kind = prediction.kind;
        if prediction.vote(kind) == Some(record.outcome) {
            return;
        }
        self.mispredictions[kind.slot()] += 1;
        if let (PredictorKind::Hybrid, Some(c)) = (kind, prediction.provider) {
            self.mispredictions[PredictorKind::from(c).slot()] += 1;
        }
    }

    /// Returns the number of mispredictions charged to a predictor.
    pub fn mispredictions(&self, kind: PredictorKind) -> u64 {
        self.mispredictions[kind.slot()]
    }

    /// Returns the combined predictor and BTB misprediction rate as a
    /// percentage of all predictions.
    ///
    /// When the BTB never identified a branch, the BTB misses are reported
    /// against the number of branches instead. An empty trace has a rate
    /// of zero.
    pub fn misprediction_rate(&self, kind: PredictorKind) -> f64 {
        let misses = self.mispredictions(kind) + self.btb_mispredictions;
        let total = if self.num_predictions == 0 {
            self.num_branches
        } else {
            self.num_predictions
        };
        if total == 0 {
            return 0.0;
        }
        100.0 * misses as f64 / total as f64
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::PredictorConfig;
    use crate::predictor::{ Predictor, SaturatingCounterConfig };

    fn predictor(cfg: PredictorConfig) -> Predictor {
        Predictor::new(&cfg, SaturatingCounterConfig::default())
    }

    #[test]
    fn counts_a_bimodal_miss() {
        let p = predictor(PredictorConfig::Bimodal { bimodal_bits: 4 });
        let mut stats = Stats::new();
        let record = BranchRecord::new(0x1000, Outcome::T);
        stats.record(&p.predict(0x1000), &record);
        assert_eq!(stats.num_branches, 1);
        assert_eq!(stats.num_predictions, 1);
        assert_eq!(stats.mispredictions(PredictorKind::Bimodal), 1);
        assert_eq!(stats.mispredictions(PredictorKind::Gshare), 0);
        assert_eq!(stats.misprediction_rate(PredictorKind::Bimodal), 100.0);
    }

    #[test]
    fn hits_are_not_charged() {
        let p = predictor(PredictorConfig::Gshare { gshare_bits: 4, history_bits: 2 });
        let mut stats = Stats::new();
        stats.record(&p.predict(0x1000), &BranchRecord::new(0x1000, Outcome::N));
        assert_eq!(stats.num_predictions, 1);
        assert_eq!(stats.mispredictions, [0; 4]);
        assert_eq!(stats.misprediction_rate(PredictorKind::Gshare), 0.0);
    }

    #[test]
    fn hybrid_miss_is_charged_to_the_provider() {
        let p = predictor(PredictorConfig::Hybrid {
            chooser_bits: 2, gshare_bits: 4, history_bits: 2, bimodal_bits: 4,
        });
        let mut stats = Stats::new();
        stats.record(&p.predict(0x1000), &BranchRecord::new(0x1000, Outcome::T));
        assert_eq!(stats.mispredictions(PredictorKind::Hybrid), 1);
        assert_eq!(stats.mispredictions(PredictorKind::Bimodal), 1);
        assert_eq!(stats.mispredictions(PredictorKind::Gshare), 0);
        assert_eq!(stats.mispredictions(PredictorKind::YehPatt), 0);
    }

    #[test]
    fn btb_miss_skips_the_direction_predictor() {
        let mut stats = Stats::new();
        let prediction = Prediction::not_branch(PredictorKind::Bimodal);
        stats.record(&prediction, &BranchRecord::new(0x1000, Outcome::T));
        assert_eq!(stats.num_branches, 1);
        assert_eq!(stats.num_predictions, 0);
        assert_eq!(stats.btb_mispredictions, 1);
        assert_eq!(stats.mispredictions, [0; 4]);
        assert_eq!(stats.misprediction_rate(PredictorKind::Bimodal), 100.0);
    }

    #[test]
    fn empty_trace_has_no_misprediction_rate() {
        let stats = Stats::new();
        assert_eq!(stats.misprediction_rate(PredictorKind::Gshare), 0.0);
    }

    #[test]
    fn btb_hit_on_a_non_branch() {
        let p = predictor(PredictorConfig::Bimodal { bimodal_bits: 4 });
        let mut stats = Stats::new();
        stats.record(&p.predict(0x1000), &BranchRecord::not_branch(0x1000));
        assert_eq!(stats.num_branches, 0);
        assert_eq!(stats.num_predictions, 1);
        assert_eq!(stats.btb_mispredictions, 1);
        assert_eq!(stats.misprediction_rate(PredictorKind::Bimodal), 100.0);
    }
}
