//! Evaluate a branch predictor against a trace.

use std::io::{ self, BufReader };
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use branchsim::*;

#[derive(Parser, Debug)]
#[command(
    name = "branchsim",
    version,
    about = "Branch direction predictor simulator",
    long_about = "Simulate a branch predictor over a trace of branch addresses and outcomes.\n\n\
Predictor parameters:\n  \
bimodal <M2> <BTB size> <BTB assoc>\n  \
gshare  <M1> <N> <BTB size> <BTB assoc>\n  \
hybrid  <K> <M1> <N> <M2> <BTB size> <BTB assoc>\n  \
yehpatt <H> <P> <BTB size> <BTB assoc>\n\n\
A BTB size of 0 disables the branch target buffer."
)]
struct Cli {
    /// Predictor type (bimodal, gshare, hybrid, yehpatt)
    predictor: String,

    /// Table widths followed by the BTB size and associativity
    #[arg(required = true)]
    params: Vec<String>,

    /// Trace file (reads standard input when omitted)
    #[arg(short, long)]
    trace: Option<PathBuf>,

    /// Run over a synthetic trace with this many branches instead
    #[arg(long, conflicts_with = "trace")]
    synthetic: Option<usize>,

    /// Seed for the synthetic trace
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Width of every saturating counter in bits
    #[arg(long, default_value_t = SimConfig::DEFAULT_COUNTER_BITS)]
    counter_bits: u8,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn load_records(cli: &Cli) -> Result<Vec<BranchRecord>, TraceError> {
    if let Some(len) = cli.synthetic {
        return Ok(random_trace(cli.seed, 64, len));
    }
    match &cli.trace {
        Some(path) => TextTrace::from_file(path)?.collect(),
        None => read_trace(BufReader::new(io::stdin().lock())),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let cfg = SimConfig::from_args(&cli.predictor, cli.params.as_slice())
        .and_then(|c| SimConfig::with_counter_bits(c.predictor, c.btb, cli.counter_bits));
    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        },
    };

    let records = match load_records(&cli) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        },
    };
    info!("loaded {} records", records.len());

    let mut sim = Simulation::new(cfg);
    sim.run(records);

    let cmd: Vec<String> = std::env::args().collect();
    let report = sim.report().with_command_line(cmd.join(" "));
    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("error: {}", e);
                process::exit(1);
            },
        }
    } else {
        print!("{}", report);
    }
}
