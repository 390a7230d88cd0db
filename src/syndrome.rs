//! Syndrome measurement on the planar lattice.
//!
//! **Face stabilizer** B_f = ∏ X_e for the edges e bounding face f.
//! B_f = -1 when an odd number of X errors bound f, which marks a **defect**.
//!
//! Edges past the open boundary do not exist and contribute nothing, so a
//! single error on a boundary edge produces one defect instead of two.
//! Defects are always recomputed from the edge frame.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::lattice::{Face, PlanarLattice};

impl PlanarLattice {
    /// Parity of the four edges bounding `face`; `false` for faces off the lattice.
    pub fn face_syndrome(&self, face: Face) -> bool {
        if !self.contains_face(face) {
            return false;
        }
        self.face_edges(face)
            .iter()
            .fold(false, |parity, &edge| parity ^ self.get_edge(edge))
    }

    /// Faces with odd syndrome, in row-major order (fy outer, fx inner).
    pub fn list_defects(&self) -> Vec<Face> {
        self.faces().filter(|&face| self.face_syndrome(face)).collect()
    }

    /// Number of defects currently on the lattice.
    pub fn defect_count(&self) -> usize {
        self.faces().filter(|&face| self.face_syndrome(face)).count()
    }

    /// All faces in row-major order.
    pub fn faces(&self) -> impl Iterator<Item = Face> {
        let (w, h) = (self.width() as i32, self.height() as i32);
        (0..h).flat_map(move |fy| (0..w).map(move |fx| Face::new(fx, fy)))
    }
}

/// Snapshot of every face syndrome at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Syndrome {
    width: usize,
    height: usize,
    /// Row-major face syndromes: true = defect at face (fx, fy).
    faces: Vec<bool>,
}

impl Syndrome {
    /// Measure all face stabilizers.
    pub fn measure(lattice: &PlanarLattice) -> Self {
        Self {
            width: lattice.width(),
            height: lattice.height(),
            faces: lattice.faces().map(|f| lattice.face_syndrome(f)).collect(),
        }
    }

    /// Syndrome bit at `face`; `false` off the lattice.
    pub fn get(&self, face: Face) -> bool {
        let (Ok(fx), Ok(fy)) = (usize::try_from(face.fx), usize::try_from(face.fy)) else {
            return false;
        };
        if fx >= self.width || fy >= self.height {
            return false;
        }
        self.faces[fy * self.width + fx]
    }

    /// Locations of defects, row-major.
    pub fn defects(&self) -> Vec<Face> {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, syn)| **syn)
            .map(|(idx, _)| Face::new((idx % self.width) as i32, (idx / self.width) as i32))
            .collect()
    }

    /// Total number of defects.
    pub fn num_defects(&self) -> usize {
        self.faces.iter().filter(|&&s| s).count()
    }

    /// Check if the lattice was defect-free.
    pub fn is_clean(&self) -> bool {
        self.num_defects() == 0
    }

    /// Faces whose syndrome differs between two snapshots of equal size.
    pub fn changed_faces(&self, other: &Syndrome) -> Vec<Face> {
        self.faces
            .iter()
            .zip(other.faces.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(idx, _)| Face::new((idx % self.width) as i32, (idx / self.width) as i32))
            .collect()
    }
}
