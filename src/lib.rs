//! # planar-code-sim
//!
//! Planar surface code simulator using X-error frame tracking.
//!
//! Errors live on the edges of a W×H lattice with open (non-wrapping)
//! boundaries, stored as a flat bit frame rather than a state vector.
//! Each face measures the parity of its four boundary edges; a face with odd
//! parity is a **defect**.
//!
//! ## Model
//!
//! - **Edges**: W·(H+1) horizontal + (W+1)·H vertical, one error bit each
//! - **Faces**: W·H plaquettes, syndrome = XOR of top, bottom, left, right
//! - **Open boundary**: edges past the lattice do not exist (read 0, writes ignored)
//! - **Correction**: a dual-lattice path between two faces toggles the edges it crosses
//!
//! ## Usage
//!
//! ```
//! use planar_code_sim::prelude::*;
//!
//! let mut lattice = PlanarLattice::new(5, 5).unwrap();
//! let mut rng = SimRng::new(7);
//! inject_defect_pairs(&mut lattice, &mut rng, 3);
//! assert_eq!(lattice.list_defects().len() % 2, 0);
//!
//! greedy_correct(&mut lattice).unwrap();
//! assert!(lattice.list_defects().is_empty());
//! ```

pub mod error;
pub mod lattice;
pub mod syndrome;
pub mod rng;
pub mod noise;
pub mod correction;
pub mod simulation;

pub mod prelude {
    pub use crate::error::SimError;
    pub use crate::lattice::*;
    pub use crate::syndrome::*;
    pub use crate::rng::*;
    pub use crate::noise::*;
    pub use crate::correction::*;
    pub use crate::simulation::*;
}
