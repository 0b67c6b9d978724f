//! Driving a predictor over a trace.

use tracing::{ debug, info };

use crate::branch::*;
use crate::config::SimConfig;
use crate::predictor::*;
use crate::report::Report;
use crate::stats::Stats;

/// All of the state for one simulation run.
///
/// Each branch is predicted, scored, and then used to update the predictor
/// before the next branch is predicted.
pub struct Simulation {
    cfg: SimConfig,
    predictor: Predictor,
    btb: Option<Box<dyn TargetBuffer>>,
    stats: Stats,
}
impl Simulation {
    pub fn new(cfg: SimConfig) -> Self {
        let btb: Option<Box<dyn TargetBuffer>> = if cfg.btb.is_enabled() {
            Some(Box::new(SetAssociativeBTB::new(cfg.btb.size, cfg.btb.assoc)))
        } else {
            None
        };
        Self::with_btb(cfg, btb)
    }

    /// Create a simulation with a user-provided branch target buffer.
    pub fn with_btb(cfg: SimConfig, btb: Option<Box<dyn TargetBuffer>>) -> Self {
        let predictor = Predictor::new(&cfg.predictor, cfg.counter_config());
        info!(predictor = %predictor.kind(), config = ?cfg.predictor,
            btb = btb.as_ref().map(|b| b.name()), "created simulation");
        Self { cfg, predictor, btb, stats: Stats::new() }
    }

    pub fn config(&self) -> &SimConfig { &self.cfg }
    pub fn predictor(&self) -> &Predictor { &self.predictor }
    pub fn stats(&self) -> &Stats { &self.stats }
    pub fn btb(&self) -> Option<&dyn TargetBuffer> { self.btb.as_deref() }

    /// Simulate a single instruction and return the prediction made for it.
    pub fn step(&mut self, record: &BranchRecord) -> Prediction {
        let kind = self.predictor.kind();

        // Without a BTB, every instruction is assumed to be a branch
        let hit = self.btb.as_ref().map_or(true, |btb| btb.lookup(record.pc));
        let prediction = if hit {
            self.predictor.predict(record.pc)
        } else {
            Prediction::not_branch(kind)
        };

        self.stats.record(&prediction, record);
        if prediction.outcome() != record.outcome || !hit {
            debug!(pc = %format!("{:08x}", record.pc), btb_hit = hit,
                predicted = ?prediction.outcome(), actual = ?record.outcome,
                "misprediction");
        }

        // The direction predictor only learns from branches it was asked
        // to predict.
        if hit && record.is_branch {
            self.predictor.update(record.pc, &prediction, record.outcome);
        }
        if let Some(btb) = self.btb.as_mut() {
            btb.update(record.pc, record.is_branch);
        }
        prediction
    }

    /// Simulate every record in a trace.
    pub fn run<I>(&mut self, records: I)
        where I: IntoIterator<Item = BranchRecord>
    {
        for record in records {
            self.step(&record);
        }
        info!(branches = self.stats.num_branches,
            predictions = self.stats.num_predictions,
            rate = self.stats.misprediction_rate(self.predictor.kind()),
            "simulation finished");
    }

    /// Take a snapshot of the final tables and statistics.
    pub fn report(&self) -> Report {
        Report::new(self)
    }
}
