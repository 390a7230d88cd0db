//! Correction paths on the dual lattice.
//!
//! Moving between adjacent faces crosses exactly one edge; a path of such
//! unit steps from defect `a` to defect `b` toggles a chain of edges whose
//! only endpoints are `a` and `b`, annihilating both defects.
//!
//! Routing here is L-shaped: all horizontal steps first (along the row of
//! `a`), then all vertical steps (along the column of `b`). Pairing is a
//! greedy nearest-pair heuristic, not a matching decoder.

use crate::error::Result;
use crate::lattice::{Face, PlanarLattice};

/// Manhattan distance between two faces.
pub fn manhattan_distance(a: Face, b: Face) -> u32 {
    a.fx.abs_diff(b.fx) + a.fy.abs_diff(b.fy)
}

/// Unit dual steps of the L-shaped route from `a` to `b`.
///
/// Each `(from, to)` pair is Manhattan-adjacent and consecutive pairs chain.
/// Empty when `a == b`.
pub fn dual_path(a: Face, b: Face) -> Vec<(Face, Face)> {
    let mut path = Vec::with_capacity(manhattan_distance(a, b) as usize);
    let mut cur = a;

    // Horizontal moves (change column)
    let sx = (b.fx - a.fx).signum();
    while cur.fx != b.fx {
        let next = Face::new(cur.fx + sx, cur.fy);
        path.push((cur, next));
        cur = next;
    }

    // Vertical moves (change row) from (b.fx, a.fy) to (b.fx, b.fy)
    let sy = (b.fy - a.fy).signum();
    while cur.fy != b.fy {
        let next = Face::new(cur.fx, cur.fy + sy);
        path.push((cur, next));
        cur = next;
    }

    path
}

/// Apply the L-shaped correction path from `a` to `b`, step by step.
///
/// Returns the number of steps applied.
pub fn apply_correction_path(lattice: &mut PlanarLattice, a: Face, b: Face) -> Result<usize> {
    let path = dual_path(a, b);
    for &(from, to) in &path {
        lattice.apply_dual_step(from, to)?;
    }
    log::debug!("correction path {} -> {} ({} steps)", a, b, path.len());
    Ok(path.len())
}

/// Greedy nearest-pair matching of defects.
///
/// Repeatedly picks the closest unmatched pair; ties go to the pair that
/// comes first in enumeration order. With an odd count, one defect is left
/// unpaired.
pub fn pair_nearest(defects: &[Face]) -> Vec<(Face, Face)> {
    let mut used = vec![false; defects.len()];
    let mut pairs = Vec::with_capacity(defects.len() / 2);

    for _ in 0..defects.len() / 2 {
        let mut best_dist = u32::MAX;
        let mut best = (0, 0);
        for i in 0..defects.len() {
            if used[i] {
                continue;
            }
            for j in (i + 1)..defects.len() {
                if used[j] {
                    continue;
                }
                let d = manhattan_distance(defects[i], defects[j]);
                if d < best_dist {
                    best_dist = d;
                    best = (i, j);
                }
            }
        }
        used[best.0] = true;
        used[best.1] = true;
        pairs.push((defects[best.0], defects[best.1]));
    }

    pairs
}

/// Pair the current defects greedily and apply a correction path per pair.
///
/// All pairs are chosen from a single measurement before any correction is
/// applied. Returns the number of pairs corrected.
pub fn greedy_correct(lattice: &mut PlanarLattice) -> Result<usize> {
    let pairs = pair_nearest(&lattice.list_defects());
    for &(a, b) in &pairs {
        apply_correction_path(lattice, a, b)?;
    }
    log::debug!(
        "greedy correction applied {} pairs, {} defects remain",
        pairs.len(),
        lattice.defect_count()
    );
    Ok(pairs.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Edge;

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(manhattan_distance(Face::new(0, 0), Face::new(0, 0)), 0);
        assert_eq!(manhattan_distance(Face::new(0, 0), Face::new(3, 3)), 6);
        assert_eq!(manhattan_distance(Face::new(4, 1), Face::new(1, 2)), 4);
    }

    #[test]
    fn test_dual_path_shape() {
        let path = dual_path(Face::new(1, 3), Face::new(3, 1));
        assert_eq!(
            path,
            vec![
                (Face::new(1, 3), Face::new(2, 3)),
                (Face::new(2, 3), Face::new(3, 3)),
                (Face::new(3, 3), Face::new(3, 2)),
                (Face::new(3, 2), Face::new(3, 1)),
            ]
        );
        assert!(dual_path(Face::new(2, 2), Face::new(2, 2)).is_empty());
    }

    #[test]
    fn test_dual_path_steps_are_unit() {
        let path = dual_path(Face::new(4, 0), Face::new(0, 4));
        assert_eq!(path.len(), 8);
        for (from, to) in &path {
            assert_eq!(manhattan_distance(*from, *to), 1);
        }
        for w in path.windows(2) {
            assert_eq!(w[0].1, w[1].0);
        }
    }

    #[test]
    fn test_correction_annihilates_pair() {
        let mut lat = PlanarLattice::new(6, 6).unwrap();
        // Chain of two errors: defects at (1,1) and (3,1)
        lat.toggle_edge(Edge::vertical(2, 1));
        lat.toggle_edge(Edge::vertical(3, 1));
        assert_eq!(lat.list_defects(), vec![Face::new(1, 1), Face::new(3, 1)]);

        let steps = apply_correction_path(&mut lat, Face::new(1, 1), Face::new(3, 1)).unwrap();
        assert_eq!(steps, 2);
        assert!(lat.list_defects().is_empty());
        assert_eq!(lat.error_count(), 0);
    }

    #[test]
    fn test_detour_leaves_closed_loop() {
        let mut lat = PlanarLattice::new(5, 5).unwrap();
        // Defects at (1,1) and (2,2) from an error path that goes down then right
        lat.toggle_edge(Edge::horizontal(1, 2));
        lat.toggle_edge(Edge::vertical(2, 2));
        assert_eq!(lat.list_defects(), vec![Face::new(1, 1), Face::new(2, 2)]);

        // The L path goes right then down; error + correction form a closed loop
        apply_correction_path(&mut lat, Face::new(1, 1), Face::new(2, 2)).unwrap();
        assert!(lat.list_defects().is_empty());
        assert_eq!(lat.error_count(), 4);
    }

    #[test]
    fn test_pair_nearest() {
        let defects = vec![
            Face::new(0, 0),
            Face::new(5, 0),
            Face::new(0, 1),
            Face::new(5, 2),
        ];
        let pairs = pair_nearest(&defects);
        assert_eq!(
            pairs,
            vec![
                (Face::new(0, 0), Face::new(0, 1)),
                (Face::new(5, 0), Face::new(5, 2)),
            ]
        );
    }

    #[test]
    fn test_pair_nearest_odd_leaves_one() {
        let defects = vec![Face::new(0, 0), Face::new(1, 0), Face::new(4, 4)];
        let pairs = pair_nearest(&defects);
        assert_eq!(pairs, vec![(Face::new(0, 0), Face::new(1, 0))]);
        assert!(pair_nearest(&[]).is_empty());
    }

    #[test]
    fn test_greedy_correct_clears_interior_noise() {
        use crate::noise::inject_defect_pairs;
        use crate::rng::SimRng;

        let mut rng = SimRng::new(31);
        for _ in 0..20 {
            let mut lat = PlanarLattice::new(7, 7).unwrap();
            inject_defect_pairs(&mut lat, &mut rng, 5);
            greedy_correct(&mut lat).unwrap();
            assert!(
                lat.list_defects().is_empty(),
                "greedy correction should clear all defects, {} remain",
                lat.defect_count()
            );
        }
    }

    #[test]
    fn test_greedy_correct_leaves_odd_defect() {
        let mut lat = PlanarLattice::new(4, 4).unwrap();
        lat.toggle_edge(Edge::horizontal(0, 0));
        lat.toggle_edge(Edge::vertical(2, 2));
        assert_eq!(lat.defect_count(), 3);
        assert_eq!(greedy_correct(&mut lat).unwrap(), 1);
        assert_eq!(lat.defect_count(), 1);
    }
}
