//! Monte Carlo driver: noise bursts, greedy correction, residual statistics.
//!
//! Each trial resets one reused lattice, injects a burst of fresh interior
//! toggles (always an even number of defects), layers i.i.d. edge noise on
//! top (which may hit boundary edges and leave an odd defect), then applies
//! the greedy nearest-pair correction and records what is left.
//!
//! A single seeded [`SimRng`] drives every draw in order, so the same config
//! always produces the same [`SimResult`].

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::correction::greedy_correct;
use crate::error::{Result, SimError};
use crate::lattice::{PlanarLattice, MIN_DIMENSION};
use crate::noise::{apply_edge_noise, inject_defect_pairs};
use crate::rng::SimRng;

/// Configuration for a Monte Carlo experiment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Face columns W.
    pub width: usize,
    /// Face rows H.
    pub height: usize,
    /// Independent flip probability per edge, applied after the burst.
    pub p_error: f64,
    /// Fresh interior toggles per burst.
    pub defect_pairs: usize,
    /// Number of Monte Carlo trials.
    pub trials: usize,
    /// Generator seed.
    pub seed: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 7,
            height: 7,
            p_error: 0.0,
            defect_pairs: 3,
            trials: 100,
            seed: 1,
        }
    }
}

impl SimConfig {
    /// Check dimensions and probability before running anything.
    pub fn validate(&self) -> Result<()> {
        if self.width < MIN_DIMENSION || self.height < MIN_DIMENSION {
            return Err(SimError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=1.0).contains(&self.p_error) {
            return Err(SimError::InvalidProbability(self.p_error));
        }
        Ok(())
    }

    /// Parse a JSON config. Missing fields take their default values.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// What happened in a single trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrialOutcome {
    /// Fresh interior toggles actually applied by the burst.
    pub burst_toggles: usize,
    /// Edges flipped by i.i.d. noise.
    pub noise_flips: usize,
    /// Defects present before correction.
    pub defects_before: usize,
    /// Pairs corrected by the greedy heuristic.
    pub pairs_corrected: usize,
    /// Defects left after correction.
    pub residual_defects: usize,
}

/// Aggregate result of a Monte Carlo experiment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimResult {
    pub width: usize,
    pub height: usize,
    pub p_error: f64,
    pub trials: usize,
    /// Mean defect count before correction.
    pub mean_defects: f64,
    /// Trials that ended with no defects.
    pub clean_trials: usize,
    /// clean_trials / trials.
    pub clean_rate: f64,
    /// Trials whose burst fell short of `defect_pairs` toggles.
    pub short_bursts: usize,
}

/// Run a single trial on `lattice`, which is reset first.
pub fn run_trial<R: Rng + ?Sized>(
    lattice: &mut PlanarLattice,
    config: &SimConfig,
    rng: &mut R,
) -> Result<TrialOutcome> {
    lattice.reset();
    let burst_toggles = inject_defect_pairs(lattice, rng, config.defect_pairs);
    let noise_flips = if config.p_error > 0.0 {
        apply_edge_noise(lattice, config.p_error, rng)
    } else {
        0
    };
    let defects_before = lattice.defect_count();
    let pairs_corrected = greedy_correct(lattice)?;
    Ok(TrialOutcome {
        burst_toggles,
        noise_flips,
        defects_before,
        pairs_corrected,
        residual_defects: lattice.defect_count(),
    })
}

/// Run a full experiment from a validated config.
pub fn run_experiment(config: &SimConfig) -> Result<SimResult> {
    config.validate()?;
    let mut lattice = PlanarLattice::new(config.width, config.height)?;
    let mut rng = SimRng::new(config.seed);

    let mut total_defects = 0;
    let mut clean_trials = 0;
    let mut short_bursts = 0;

    for _ in 0..config.trials {
        let outcome = run_trial(&mut lattice, config, &mut rng)?;
        total_defects += outcome.defects_before;
        if outcome.residual_defects == 0 {
            clean_trials += 1;
        }
        if outcome.burst_toggles < config.defect_pairs {
            short_bursts += 1;
        }
    }

    let trials = config.trials.max(1) as f64;
    let result = SimResult {
        width: config.width,
        height: config.height,
        p_error: config.p_error,
        trials: config.trials,
        mean_defects: total_defects as f64 / trials,
        clean_trials,
        clean_rate: clean_trials as f64 / trials,
        short_bursts,
    };
    log::info!(
        "{}x{} p={} trials={}: clean rate {:.3}",
        result.width,
        result.height,
        result.p_error,
        result.trials,
        result.clean_rate
    );
    Ok(result)
}

/// Run an experiment for each error rate, all other parameters fixed.
pub fn error_rate_sweep(base: &SimConfig, error_rates: &[f64]) -> Result<Vec<SimResult>> {
    error_rates
        .iter()
        .map(|&p| {
            run_experiment(&SimConfig {
                p_error: p,
                ..base.clone()
            })
        })
        .collect()
}
