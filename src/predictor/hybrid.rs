//! A tournament predictor which arbitrates between [Bimodal] and [Gshare].

use crate::branch::Outcome;
use crate::predictor::*;

/// Output from [Hybrid::predict].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HybridPrediction {
    /// Vote from the bimodal component
    pub bimodal: Outcome,
    /// Vote from the gshare component
    pub gshare: Outcome,
    /// The component selected by the chooser table
    pub provider: Component,
}
impl HybridPrediction {
    /// Returns the vote from the selected component.
    pub fn outcome(&self) -> Outcome {
        match self.provider {
            Component::Bimodal => self.bimodal,
            Component::Gshare => self.gshare,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Hybrid {
    bct: ChooserTable,
    bimodal: Bimodal,
    gshare: Gshare,
}
impl Hybrid {
    pub fn new(bct: ChooserTable, bimodal: Bimodal, gshare: Gshare) -> Self {
        Self { bct, bimodal, gshare }
    }

    pub fn predict(&self, pc: u32) -> HybridPrediction {
        HybridPrediction {
            bimodal: self.bimodal.predict(pc),
            gshare: self.gshare.predict(pc),
            provider: self.bct.choose(pc),
        }
    }

    /// Train the component that provided the prediction and the chooser.
    ///
    /// Only the selected component's counters move. The global history is
    /// advanced on every branch so that gshare sees every outcome.
    pub fn update(&mut self, pc: u32, p: &HybridPrediction, outcome: Outcome) {
        match p.provider {
            Component::Bimodal => self.bimodal.update(pc, outcome),
            Component::Gshare => self.gshare.update_table(pc, outcome),
        }
        self.gshare.update_history(outcome);
        self.bct.update(pc, p.bimodal == outcome, p.gshare == outcome);
    }

    pub fn chooser(&self) -> &ChooserTable { &self.bct }
    pub fn bimodal(&self) -> &Bimodal { &self.bimodal }
    pub fn gshare(&self) -> &Gshare { &self.gshare }
}
