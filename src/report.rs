//! Snapshots of a finished simulation.

use std::fmt;
use itertools::Itertools;
use serde::Serialize;

use crate::config::SimConfig;
use crate::predictor::*;
use crate::sim::Simulation;
use crate::stats::Stats;

/// The final contents of one table, in index order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableSnapshot {
    pub name: &'static str,
    pub values: Vec<u32>,
}
impl TableSnapshot {
    fn counters(name: &'static str, table: &CounterTable) -> Self {
        Self { name, values: table.values().map(u32::from).collect() }
    }
}

/// Read-only view of the final state of a [Simulation].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    /// The command line used to start the run, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_line: Option<String>,

    pub config: SimConfig,

    /// BTB tags in each set (most-recently used first)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub btb: Option<Vec<Vec<u32>>>,

    pub tables: Vec<TableSnapshot>,

    /// Final global history, printed most-significant bit first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ghr: Option<String>,

    pub stats: Stats,

    pub misprediction_rate: f64,
}
impl Report {
    pub fn new(sim: &Simulation) -> Self {
        let (tables, ghr) = match sim.predictor() {
            Predictor::Bimodal(p) => {
                (vec![TableSnapshot::counters("Bimodal", p.table())], None)
            },
            Predictor::Gshare(p) => {
                (vec![TableSnapshot::counters("GShare", p.table())],
                 Some(p.ghr().to_string()))
            },
            Predictor::Hybrid(p) => {
                (vec![
                    TableSnapshot::counters("Bimodal", p.bimodal().table()),
                    TableSnapshot::counters("GShare", p.gshare().table()),
                    TableSnapshot::counters("Chooser", p.chooser().table()),
                ], Some(p.gshare().ghr().to_string()))
            },
            Predictor::YehPatt(p) => {
                let bht = TableSnapshot {
                    name: "History",
                    values: p.history_table().values().collect(),
                };
                (vec![bht, TableSnapshot::counters("Pattern", p.pattern_table())],
                 None)
            },
        };
        let kind = sim.predictor().kind();
        Self {
            command_line: None,
            config: *sim.config(),
            btb: sim.btb().map(|b| b.contents()),
            tables,
            ghr,
            stats: sim.stats().clone(),
            misprediction_rate: sim.stats().misprediction_rate(kind),
        }
    }

    pub fn with_command_line(mut self, cmd: impl Into<String>) -> Self {
        self.command_line = Some(cmd.into());
        self
    }

    pub fn kind(&self) -> PredictorKind { self.config.predictor.kind() }

    /// Returns the snapshot of a table by name.
    pub fn table(&self, name: &str) -> Option<&TableSnapshot> {
        self.tables.iter().find(|t| t.name == name)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(cmd) = &self.command_line {
            writeln!(f, "Command Line:")?;
            writeln!(f, "{}", cmd)?;
            writeln!(f)?;
        }

        if let Some(sets) = &self.btb {
            writeln!(f, "Final BTB Tag Array Contents:")?;
            for (idx, set) in sets.iter().enumerate() {
                writeln!(f, "set {:6}: {}", idx,
                    set.iter().map(|t| format!("{:x}", t)).join(" "))?;
            }
            writeln!(f)?;
        }

        for table in self.tables.iter() {
            writeln!(f, "Final {} Table Contents:", table.name)?;
            for (idx, val) in table.values.iter().enumerate() {
                writeln!(f, "table[{}]: {}", idx, val)?;
            }
            writeln!(f)?;
        }
        if let Some(ghr) = &self.ghr {
            writeln!(f, "Final GHR Contents: {}", ghr)?;
            writeln!(f)?;
        }

        let kind = self.kind();
        let s = &self.stats;
        writeln!(f, "Final Branch Predictor Statistics:")?;
        writeln!(f, "a. Number of branches: {}", s.num_branches)?;
        writeln!(f, "b. Number of predictions from the branch predictor: {}",
            s.num_predictions)?;
        writeln!(f, "c. Number of mispredictions from the branch predictor: {}",
            s.mispredictions(kind))?;
        if kind == PredictorKind::Hybrid {
            for c in [PredictorKind::Bimodal, PredictorKind::Gshare] {
                writeln!(f, "   - charged to {}: {}", c, s.mispredictions(c))?;
            }
        }
        writeln!(f, "d. Number of mispredictions from the BTB: {}",
            s.btb_mispredictions)?;
        writeln!(f, "e. Misprediction Rate: {:6.2} percent", self.misprediction_rate)
    }
}
