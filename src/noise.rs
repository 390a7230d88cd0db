//! Noise injection: i.i.d. edge flips and localized defect-pair bursts.
//!
//! Every routine draws from a caller-owned generator in a fixed sequential
//! order, so a seeded [`SimRng`](crate::rng::SimRng) reproduces a run bit for bit.
//!
//! Interior edges are the ones with a face on both sides. Flipping only
//! interior edges keeps the defect count even, which is what the burst
//! routines rely on.

use std::collections::HashSet;

use rand::Rng;

use crate::lattice::{Edge, PlanarLattice};

/// Draws allowed per fresh interior edge before giving up.
pub const MAX_FRESH_ATTEMPTS: usize = 200;

/// Toggle every edge independently with probability `p`.
///
/// Visits horizontal edges row by row, then vertical edges row by row, one
/// draw per edge. Returns the number of edges toggled.
pub fn apply_edge_noise<R: Rng + ?Sized>(lattice: &mut PlanarLattice, p: f64, rng: &mut R) -> usize {
    let mut flipped = 0;
    for idx in 0..lattice.num_edges() {
        let Some(edge) = lattice.index_to_edge(idx) else {
            continue;
        };
        if rng.gen::<f64>() < p {
            lattice.toggle_edge(edge);
            flipped += 1;
        }
    }
    log::debug!(
        "edge noise p={} flipped {}/{} edges",
        p,
        flipped,
        lattice.num_edges()
    );
    flipped
}

/// Draw an interior edge uniformly: a fair coin picks the kind, then the
/// coordinates are uniform over that kind's interior range.
///
/// Horizontal: x in [0, W), y in [1, H-1]. Vertical: x in [1, W-1], y in [0, H).
pub fn random_interior_edge<R: Rng + ?Sized>(lattice: &PlanarLattice, rng: &mut R) -> Edge {
    let w = lattice.width() as i32;
    let h = lattice.height() as i32;
    if rng.gen_bool(0.5) {
        Edge::horizontal(rng.gen_range(0..w), rng.gen_range(1..h))
    } else {
        Edge::vertical(rng.gen_range(1..w), rng.gen_range(0..h))
    }
}

/// Toggle an interior edge not already in `used`, and record it there.
///
/// Gives up after [`MAX_FRESH_ATTEMPTS`] draws and returns `None` without
/// touching the lattice. That shortfall is tolerated: the burst just ends up
/// one edge short.
pub fn toggle_fresh_interior_edge<R: Rng + ?Sized>(
    lattice: &mut PlanarLattice,
    rng: &mut R,
    used: &mut HashSet<Edge>,
) -> Option<Edge> {
    for _ in 0..MAX_FRESH_ATTEMPTS {
        let edge = random_interior_edge(lattice, rng);
        if used.insert(edge) {
            lattice.toggle_edge(edge);
            log::trace!("fresh interior toggle {:?}", edge);
            return Some(edge);
        }
    }
    log::debug!(
        "no fresh interior edge after {} draws ({} already used)",
        MAX_FRESH_ATTEMPTS,
        used.len()
    );
    None
}

/// Defect-pair injection: `count` fresh interior toggles sharing one
/// used-edge set, so no toggle in the burst cancels an earlier one.
///
/// Returns how many toggles were applied; less than `count` only when the
/// fresh-edge search ran out of attempts.
pub fn inject_defect_pairs<R: Rng + ?Sized>(
    lattice: &mut PlanarLattice,
    rng: &mut R,
    count: usize,
) -> usize {
    let mut used = HashSet::with_capacity(count);
    let applied = (0..count)
        .filter(|_| toggle_fresh_interior_edge(lattice, rng, &mut used).is_some())
        .count();
    if applied < count {
        log::debug!("noise burst short: {}/{} toggles applied", applied, count);
    } else {
        log::debug!("noise burst of {} toggles applied", applied);
    }
    applied
}
