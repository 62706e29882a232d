//! Graphstep - adjacency-matrix graph analysis and step-by-step Prim's
//! algorithm.
//!
//! # Usage
//!
//! ```bash
//! graphstep analyze graphs.txt
//! graphstep prim weighted.txt --seed 42 --verify
//! RUST_LOG=debug graphstep analyze graphs.txt --fail-fast
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use graphstep_core::{
    batch,
    config::{AnalysisConfig, BatchConfig, BatchMode, DEFAULT_EXACT_WALK_LIMIT},
    error::Result,
    mst::{FirstVertex, RandomVertex, SeededVertex, StartVertex},
    report, MstStepper,
};
use tracing_subscriber::EnvFilter;

/// Adjacency-matrix graph analysis and minimum spanning trees
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report connectivity, cycles, bipartiteness and requested paths
    Analyze {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Build a minimum spanning tree step by step with Prim's algorithm
    Prim {
        #[command(flatten)]
        input: InputArgs,

        /// Start from a random vertex
        #[arg(long, conflicts_with = "seed")]
        random: bool,

        /// Start from a random vertex drawn from this seed (reproducible)
        #[arg(long)]
        seed: Option<u64>,

        /// Check each total weight against Kruskal's algorithm
        #[arg(long)]
        verify: bool,
    },
}

#[derive(ClapArgs, Debug)]
struct InputArgs {
    /// File with one graph per line
    #[arg(value_name = "GRAPH_FILE")]
    graph_file: PathBuf,

    /// Abort on the first malformed line instead of skipping it
    #[arg(long)]
    fail_fast: bool,

    /// Largest graph whose closed walks are counted exactly
    #[arg(long, default_value_t = DEFAULT_EXACT_WALK_LIMIT)]
    walk_limit: usize,
}

impl InputArgs {
    fn batch_config(&self) -> BatchConfig {
        let mode = if self.fail_fast {
            BatchMode::FailFast
        } else {
            BatchMode::BestEffort
        };
        BatchConfig::new()
            .with_mode(mode)
            .with_analysis(AnalysisConfig::new().with_exact_walk_limit(self.walk_limit))
    }

    fn load(&self) -> Result<batch::Batch> {
        let batch = batch::load_file(&self.graph_file, &self.batch_config())?;
        report::write_rejections(&mut io::stderr().lock(), &batch)?;
        Ok(batch)
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Analyze { input } => {
            let batch = input.load()?;
            let mut out = io::stdout().lock();
            report::write_analysis(&mut out, &batch)?;
        }
        Command::Prim {
            input,
            random,
            seed,
            verify,
        } => {
            let batch = input.load()?;
            let mut out = io::stdout().lock();
            let mut mismatches = 0;

            for (idx, record) in batch.records.into_iter().enumerate() {
                let start: Box<dyn StartVertex> = match (random, seed) {
                    (true, _) => Box::new(RandomVertex),
                    (false, Some(seed)) => Box::new(SeededVertex::new(seed.wrapping_add(idx as u64))),
                    (false, None) => Box::new(FirstVertex),
                };
                let mut stepper = MstStepper::with_strategy(record.graph, start);
                let summary = report::write_prim(&mut out, idx + 1, &mut stepper, verify)?;
                if summary.verified == Some(false) {
                    mismatches += 1;
                }
            }

            if mismatches > 0 {
                out.flush().ok();
                eprintln!("{} graph(s) disagreed with Kruskal's algorithm", mismatches);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
