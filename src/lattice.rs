//! Planar lattice with X-error frame tracking.
//!
//! The code lives on a W×H square lattice with **open** boundaries: nothing
//! wraps. Errors sit on **edges**:
//! - W·(H+1) horizontal edges: edge (x,y) is the top side of face (x,y)
//!   and the bottom side of face (x,y-1)
//! - (W+1)·H vertical edges: edge (x,y) is the left side of face (x,y)
//!   and the right side of face (x-1,y)
//!
//! Rows y=0 and y=H of horizontal edges (and columns x=0 and x=W of vertical
//! edges) border only one face. Any coordinate past the last row or column
//! names an edge that does not exist: reads return `false`, toggles are ignored.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Smallest width and height a lattice may have.
pub const MIN_DIMENSION: usize = 3;

/// Orientation of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EdgeKind {
    Horizontal,
    Vertical,
}

/// An edge identified by orientation and integer grid position.
///
/// Coordinates are signed so that positions beyond the boundary can be named;
/// such edges simply do not exist on the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    pub kind: EdgeKind,
    pub x: i32,
    pub y: i32,
}

impl Edge {
    pub const fn horizontal(x: i32, y: i32) -> Self {
        Self { kind: EdgeKind::Horizontal, x, y }
    }

    pub const fn vertical(x: i32, y: i32) -> Self {
        Self { kind: EdgeKind::Vertical, x, y }
    }
}

/// A face (plaquette) of the lattice. Syndromes are measured per face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face {
    pub fx: i32,
    pub fy: i32,
}

impl Face {
    pub const fn new(fx: i32, fy: i32) -> Self {
        Self { fx, fy }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.fx, self.fy)
    }
}

/// The planar lattice with X-error frame tracking.
///
/// Stores one error bit per edge in a single flat buffer: horizontal edges
/// first (row-major), then vertical edges (row-major). Faces and defects are
/// never stored; they are derived from the edge frame on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanarLattice {
    width: i32,
    height: i32,
    errors: Vec<bool>,
}

impl PlanarLattice {
    /// Create a clean W×H lattice (no errors).
    ///
    /// Fails with [`SimError::InvalidDimensions`] when either side is below
    /// [`MIN_DIMENSION`].
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let invalid = || SimError::InvalidDimensions { width, height };
        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(invalid());
        }
        // Edge coordinates run up to W and H inclusive.
        let w = i32::try_from(width).ok().filter(|&w| w < i32::MAX).ok_or_else(invalid)?;
        let h = i32::try_from(height).ok().filter(|&h| h < i32::MAX).ok_or_else(invalid)?;

        let num_edges = width * (height + 1) + (width + 1) * height;
        Ok(Self {
            width: w,
            height: h,
            errors: vec![false; num_edges],
        })
    }

    /// Number of face columns (W).
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// Number of face rows (H).
    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Total number of edges.
    pub fn num_edges(&self) -> usize {
        self.errors.len()
    }

    /// Total number of faces.
    pub fn num_faces(&self) -> usize {
        self.width() * self.height()
    }

    fn num_horizontal(&self) -> usize {
        self.width() * (self.height() + 1)
    }

    /// Whether the face lies within [0,W)×[0,H).
    pub fn contains_face(&self, face: Face) -> bool {
        (0..self.width).contains(&face.fx) && (0..self.height).contains(&face.fy)
    }

    /// Whether the edge exists on this lattice.
    pub fn contains_edge(&self, edge: Edge) -> bool {
        self.edge_index(edge).is_some()
    }

    /// Convert an edge to its linear index, or `None` if it does not exist.
    pub fn edge_index(&self, edge: Edge) -> Option<usize> {
        let (x, y) = (edge.x, edge.y);
        match edge.kind {
            EdgeKind::Horizontal => {
                if !(0..self.width).contains(&x) || !(0..=self.height).contains(&y) {
                    return None;
                }
                Some(y as usize * self.width() + x as usize)
            }
            EdgeKind::Vertical => {
                if !(0..=self.width).contains(&x) || !(0..self.height).contains(&y) {
                    return None;
                }
                Some(self.num_horizontal() + y as usize * (self.width() + 1) + x as usize)
            }
        }
    }

    /// Convert a linear index back to an edge.
    pub fn index_to_edge(&self, idx: usize) -> Option<Edge> {
        if idx >= self.num_edges() {
            return None;
        }
        let nh = self.num_horizontal();
        if idx < nh {
            let w = self.width();
            Some(Edge::horizontal((idx % w) as i32, (idx / w) as i32))
        } else {
            let w = self.width() + 1;
            let idx2 = idx - nh;
            Some(Edge::vertical((idx2 % w) as i32, (idx2 / w) as i32))
        }
    }

    /// All edges in storage order: horizontal rows top to bottom, then
    /// vertical rows top to bottom.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.num_edges()).filter_map(move |idx| self.index_to_edge(idx))
    }

    /// Toggle the error bit on an edge. Edges off the lattice are ignored.
    pub fn toggle_edge(&mut self, edge: Edge) {
        if let Some(idx) = self.edge_index(edge) {
            self.errors[idx] ^= true;
        }
    }

    /// Error bit on an edge; `false` for edges off the lattice.
    pub fn get_edge(&self, edge: Edge) -> bool {
        self.edge_index(edge).is_some_and(|idx| self.errors[idx])
    }

    /// Raw error frame (read-only), in storage order.
    pub fn errors(&self) -> &[bool] {
        &self.errors
    }

    /// Number of edges currently carrying an error.
    pub fn error_count(&self) -> usize {
        self.errors.iter().filter(|&&e| e).count()
    }

    /// Reset all errors to the clean state, keeping the dimensions.
    pub fn reset(&mut self) {
        self.errors.iter_mut().for_each(|e| *e = false);
    }

    /// The 4 edges bounding face (fx, fy): top, bottom, left, right.
    pub fn face_edges(&self, face: Face) -> [Edge; 4] {
        let Face { fx, fy } = face;
        [
            Edge::horizontal(fx, fy),     // top
            Edge::horizontal(fx, fy + 1), // bottom
            Edge::vertical(fx, fy),       // left
            Edge::vertical(fx + 1, fy),   // right
        ]
    }

    /// The two faces an edge separates. Either may lie off the lattice.
    ///
    /// Horizontal edge (x,y) separates faces (x,y-1) above and (x,y) below;
    /// vertical edge (x,y) separates faces (x-1,y) left and (x,y) right.
    pub fn edge_faces(&self, edge: Edge) -> [Face; 2] {
        match edge.kind {
            EdgeKind::Horizontal => [Face::new(edge.x, edge.y - 1), Face::new(edge.x, edge.y)],
            EdgeKind::Vertical => [Face::new(edge.x - 1, edge.y), Face::new(edge.x, edge.y)],
        }
    }

    /// Whether both faces adjacent to the edge exist.
    pub fn is_interior(&self, edge: Edge) -> bool {
        self.contains_edge(edge) && self.edge_faces(edge).iter().all(|&f| self.contains_face(f))
    }

    /// The edge crossed by a unit dual step from `from` to `to`.
    ///
    /// Returns `Ok(None)` when either face is off the lattice: a path may
    /// leave through the boundary without effect.
    pub fn dual_step_edge(&self, from: Face, to: Face) -> Result<Option<Edge>> {
        let distance = u64::from(from.fx.abs_diff(to.fx)) + u64::from(from.fy.abs_diff(to.fy));
        if distance != 1 {
            return Err(SimError::InvalidStep { from, to });
        }
        if !self.contains_face(from) || !self.contains_face(to) {
            return Ok(None);
        }
        let edge = if to.fx > from.fx {
            Edge::vertical(from.fx + 1, from.fy) // right side of `from`
        } else if to.fx < from.fx {
            Edge::vertical(from.fx, from.fy) // left side
        } else if to.fy > from.fy {
            Edge::horizontal(from.fx, from.fy + 1) // bottom side
        } else {
            Edge::horizontal(from.fx, from.fy) // top side
        };
        Ok(Some(edge))
    }

    /// Apply one dual-lattice step between Manhattan-adjacent faces by
    /// toggling the edge they share.
    ///
    /// A non-unit step fails with [`SimError::InvalidStep`] and leaves the
    /// lattice unchanged. A step touching a face off the lattice is a no-op.
    pub fn apply_dual_step(&mut self, from: Face, to: Face) -> Result<()> {
        if let Some(edge) = self.dual_step_edge(from, to)? {
            log::trace!("dual step {} -> {} toggles {:?}", from, to, edge);
            self.toggle_edge(edge);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lattice_clean() {
        let lat = PlanarLattice::new(4, 3).unwrap();
        assert_eq!(lat.width(), 4);
        assert_eq!(lat.height(), 3);
        // 4·4 horizontal + 5·3 vertical
        assert_eq!(lat.num_edges(), 31);
        assert_eq!(lat.num_faces(), 12);
        assert!(lat.errors().iter().all(|&e| !e));
    }

    #[test]
    fn test_rejects_small_dimensions() {
        assert!(matches!(
            PlanarLattice::new(2, 5),
            Err(SimError::InvalidDimensions { width: 2, height: 5 })
        ));
        assert!(PlanarLattice::new(5, 0).is_err());
        assert!(PlanarLattice::new(3, 3).is_ok());
    }

    #[test]
    fn test_edge_index_roundtrip() {
        let lat = PlanarLattice::new(5, 4).unwrap();
        for idx in 0..lat.num_edges() {
            let edge = lat.index_to_edge(idx).unwrap();
            assert_eq!(lat.edge_index(edge), Some(idx));
        }
        assert_eq!(lat.index_to_edge(lat.num_edges()), None);
    }

    #[test]
    fn test_edge_ranges() {
        let lat = PlanarLattice::new(3, 3).unwrap();
        assert!(lat.contains_edge(Edge::horizontal(2, 3)));
        assert!(!lat.contains_edge(Edge::horizontal(3, 0)));
        assert!(!lat.contains_edge(Edge::horizontal(0, 4)));
        assert!(lat.contains_edge(Edge::vertical(3, 2)));
        assert!(!lat.contains_edge(Edge::vertical(0, 3)));
        assert!(!lat.contains_edge(Edge::vertical(-1, 0)));
    }

    #[test]
    fn test_toggle_errors() {
        let mut lat = PlanarLattice::new(4, 4).unwrap();
        let edge = Edge::horizontal(1, 2);
        assert!(!lat.get_edge(edge));
        lat.toggle_edge(edge);
        assert!(lat.get_edge(edge));
        assert_eq!(lat.error_count(), 1);
        lat.toggle_edge(edge);
        assert!(!lat.get_edge(edge));
    }

    #[test]
    fn test_out_of_range_toggle_is_noop() {
        let mut lat = PlanarLattice::new(4, 4).unwrap();
        let before = lat.clone();
        for edge in [
            Edge::horizontal(4, 0),
            Edge::horizontal(-1, 2),
            Edge::horizontal(0, 5),
            Edge::vertical(5, 0),
            Edge::vertical(2, 4),
            Edge::vertical(0, -1),
        ] {
            lat.toggle_edge(edge);
            assert!(!lat.get_edge(edge));
        }
        assert_eq!(lat, before);
    }

    #[test]
    fn test_face_edges_distinct() {
        let lat = PlanarLattice::new(4, 4).unwrap();
        let edges = lat.face_edges(Face::new(0, 0));
        for i in 0..4 {
            assert!(lat.contains_edge(edges[i]));
            for j in (i + 1)..4 {
                assert_ne!(lat.edge_index(edges[i]), lat.edge_index(edges[j]));
            }
        }
    }

    #[test]
    fn test_interior_edges() {
        let lat = PlanarLattice::new(4, 3).unwrap();
        assert!(!lat.is_interior(Edge::horizontal(0, 0)));
        assert!(lat.is_interior(Edge::horizontal(0, 1)));
        assert!(!lat.is_interior(Edge::horizontal(3, 3)));
        assert!(!lat.is_interior(Edge::vertical(0, 1)));
        assert!(lat.is_interior(Edge::vertical(3, 1)));
        assert!(!lat.is_interior(Edge::vertical(4, 1)));
        // W·(H-1) interior horizontal + (W-1)·H interior vertical
        assert_eq!(lat.edges().filter(|&e| lat.is_interior(e)).count(), 4 * 2 + 3 * 3);
    }

    #[test]
    fn test_dual_step_directions() {
        let lat = PlanarLattice::new(5, 5).unwrap();
        let from = Face::new(2, 2);
        assert_eq!(lat.dual_step_edge(from, Face::new(3, 2)).unwrap(), Some(Edge::vertical(3, 2)));
        assert_eq!(lat.dual_step_edge(from, Face::new(1, 2)).unwrap(), Some(Edge::vertical(2, 2)));
        assert_eq!(lat.dual_step_edge(from, Face::new(2, 3)).unwrap(), Some(Edge::horizontal(2, 3)));
        assert_eq!(lat.dual_step_edge(from, Face::new(2, 1)).unwrap(), Some(Edge::horizontal(2, 2)));
    }

    #[test]
    fn test_dual_step_toggles_single_edge() {
        let mut lat = PlanarLattice::new(5, 5).unwrap();
        lat.apply_dual_step(Face::new(2, 2), Face::new(3, 2)).unwrap();
        assert_eq!(lat.error_count(), 1);
        assert!(lat.get_edge(Edge::vertical(3, 2)));
    }

    #[test]
    fn test_dual_step_off_lattice_is_noop() {
        let mut lat = PlanarLattice::new(3, 3).unwrap();
        lat.apply_dual_step(Face::new(0, 1), Face::new(-1, 1)).unwrap();
        lat.apply_dual_step(Face::new(2, 2), Face::new(2, 3)).unwrap();
        assert_eq!(lat.error_count(), 0);
    }

    #[test]
    fn test_invalid_step_rejected() {
        let mut lat = PlanarLattice::new(5, 5).unwrap();
        lat.toggle_edge(Edge::horizontal(1, 1));
        let before = lat.clone();
        let err = lat.apply_dual_step(Face::new(1, 1), Face::new(3, 1)).unwrap_err();
        assert!(matches!(err, SimError::InvalidStep { .. }));
        assert!(lat.apply_dual_step(Face::new(1, 1), Face::new(1, 1)).is_err());
        assert!(lat.apply_dual_step(Face::new(1, 1), Face::new(2, 2)).is_err());
        assert_eq!(lat, before);
    }

    #[test]
    fn test_reset() {
        let mut lat = PlanarLattice::new(4, 4).unwrap();
        lat.toggle_edge(Edge::horizontal(0, 0));
        lat.toggle_edge(Edge::vertical(1, 1));
        lat.reset();
        assert_eq!(lat.error_count(), 0);
        assert_eq!(lat.width(), 4);
    }
}
