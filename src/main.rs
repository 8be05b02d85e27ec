use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rpmd_eckart::{read_config, run_simulation, seeded_rng, ResultSink, RpmdError, SimulationConfig};

/// Ring-polymer molecular dynamics rate constant for an Eckart barrier.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Output file; per-sample contributions and the rate line are appended
    output: PathBuf,

    /// YAML configuration overriding the reference-run parameters
    #[arg(short, long)]
    config: Option<String>,

    /// RNG seed for a reproducible ensemble
    #[arg(long)]
    seed: Option<u64>,

    /// Number of trajectories (must be even)
    #[arg(short = 'n', long)]
    n_samples: Option<usize>,
}

fn run(args: &Args) -> Result<(), RpmdError> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.simulation.seed = Some(seed);
    }
    if let Some(n_samples) = args.n_samples {
        config.simulation.n_samples = n_samples;
    }
    config.validate()?;

    let mut sink = ResultSink::append_to(&args.output, config.simulation.flush_interval)?;
    let summary = run_simulation(&config, seeded_rng(config.simulation.seed), &mut sink)?;
    sink.finish()?;

    println!(
        "T = {} K  k = {:e}  log10 k = {:.6}  ({} samples written to {})",
        config.physics.temperature,
        summary.rate.rate_constant,
        summary.rate.log10_rate,
        summary.samples,
        args.output.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
