//! Deterministic pseudo-random source for reproducible noise.
//!
//! `SimRng` is a 32-bit mulberry32 generator: one `u32` of state, advanced by
//! a Weyl increment and scrambled by two multiply-xorshift rounds. It is not
//! cryptographic; it exists so that a seed fully determines a run.
//!
//! The generator implements [`rand::RngCore`] and [`rand::SeedableRng`], so
//! every noise routine takes `R: Rng` and works with it or any other `rand`
//! generator the caller owns.

use rand::{Error, RngCore, SeedableRng};

const WEYL_INCREMENT: u32 = 0x6D2B_79F5;

/// Seeded mulberry32 generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimRng {
    state: u32,
}

impl SimRng {
    /// Creates a generator from a 32-bit seed. Every seed, including 0, is valid.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next value of the 32-bit stream.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(WEYL_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next float in [0, 1), built from one `u32` draw.
    pub fn next_float(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

impl RngCore for SimRng {
    fn next_u32(&mut self) -> u32 {
        SimRng::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(SimRng::next_u32(self));
        let hi = u64::from(SimRng::next_u32(self));
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = SimRng::next_u32(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SimRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new((state ^ (state >> 32)) as u32)
    }
}
