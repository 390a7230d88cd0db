//! Error type shared by the lattice, routing and simulation layers.

use thiserror::Error;

use crate::lattice::Face;

/// Errors raised by the simulator.
///
/// Out-of-range coordinates are never an error: they model the open boundary
/// and degrade to no-ops. Only caller contract violations end up here.
#[derive(Debug, Error)]
pub enum SimError {
    /// Lattice dimensions below the minimum (or too large to address).
    #[error("lattice must be at least 3x3, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Dual step between faces that are not Manhattan neighbours.
    #[error("dual step from {from} to {to} is not a unit move")]
    InvalidStep { from: Face, to: Face },

    /// Error probability outside [0, 1].
    #[error("error probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    /// Malformed JSON configuration.
    #[cfg(feature = "serde")]
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
