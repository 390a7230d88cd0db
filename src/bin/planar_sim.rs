use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use planar_code_sim::prelude::*;

/// Monte Carlo runs of defect bursts and greedy correction on a planar lattice.
#[derive(Debug, Parser)]
#[command(name = "planar-sim", version)]
struct Args {
    /// JSON config file; explicit flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Face columns.
    #[arg(long)]
    width: Option<usize>,

    /// Face rows.
    #[arg(long)]
    height: Option<usize>,

    /// Independent flip probability per edge.
    #[arg(long)]
    p_error: Option<f64>,

    /// Fresh interior toggles per burst.
    #[arg(long)]
    defect_pairs: Option<usize>,

    /// Number of trials.
    #[arg(long)]
    trials: Option<usize>,

    /// Generator seed.
    #[arg(long)]
    seed: Option<u32>,

    /// Comma-separated error rates to sweep instead of a single run.
    #[arg(long, value_delimiter = ',')]
    sweep: Vec<f64>,
}

impl Args {
    fn into_config(self) -> Result<(SimConfig, Vec<f64>), Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => {
                info!("loading config from {}", path.display());
                SimConfig::from_json(&fs::read_to_string(path)?)?
            }
            None => SimConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(p) = self.p_error {
            config.p_error = p;
        }
        if let Some(pairs) = self.defect_pairs {
            config.defect_pairs = pairs;
        }
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.validate()?;
        Ok((config, self.sweep))
    }
}

fn print_result(r: &SimResult) {
    println!(
        "  p={:.3}  mean defects {:>6.2}  clean {:>5}/{:<5} ({:.3})  short bursts {}",
        r.p_error, r.mean_defects, r.clean_trials, r.trials, r.clean_rate, r.short_bursts
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let (config, sweep) = Args::parse().into_config()?;
    println!(
        "Planar lattice {}x{}, {} burst toggles, {} trials, seed {}",
        config.width, config.height, config.defect_pairs, config.trials, config.seed
    );

    if sweep.is_empty() {
        print_result(&run_experiment(&config)?);
    } else {
        for result in error_rate_sweep(&config, &sweep)? {
            print_result(&result);
        }
    }

    Ok(())
}
