//! A functional simulator for branch direction predictors.
//!
//! Four predictors are available: bimodal, gshare, a bimodal/gshare hybrid
//! with a chooser table, and a two-level adaptive (Yeh-Patt) predictor.
//! A [Simulation] drives one of them over a trace and keeps [Stats].

pub mod branch;
pub mod history;
pub mod predictor;
pub mod config;
pub mod stats;
pub mod sim;
pub mod report;
pub mod trace;

pub use branch::*;
pub use history::*;
pub use predictor::*;
pub use config::*;
pub use stats::*;
pub use sim::*;
pub use report::*;
pub use trace::*;
