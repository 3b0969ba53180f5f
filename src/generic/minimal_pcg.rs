//! A simple pseudorandom number generator.
//!
//! Specifically, a translation of the *really* minimal C PCG32 implementation from <https://www.pcg-random.org/>, implemented to satisfy [RngCore].
//!
//! The [engine](crate::engine) is parameterised by any source of randomness, with [MinimalPCG32] fixed by the [Engine](crate::engine::Engine) alias.
//! Seeding is deterministic, from the [seed](crate::config::EngineConfig::seed) of the configuration.

use rand::SeedableRng;
use rand_core::{impls, RngCore};

/// State and increment.
#[derive(Default, Clone)]
pub struct MinimalPCG32 {
    state: u64,
    inc: u64,
}

impl RngCore for MinimalPCG32 {
    fn next_u32(&mut self) -> u32 {
        let old_state = self.state;

        self.state = old_state
            .wrapping_mul(6364136223846793005_u64)
            .wrapping_add(self.inc);

        let xorshifted = ((old_state >> 18) ^ old_state) >> 27;
        let rot = (old_state >> 59) as u32;
        xorshifted.rotate_right(rot) as u32
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }
}

impl SeedableRng for MinimalPCG32 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        const INCREMENT: u64 = 3215534235932367344;
        Self {
            state: (u64::from_le_bytes(seed)).wrapping_add(INCREMENT),
            inc: INCREMENT,
        }
    }
}

#[cfg(test)]
mod pcg_tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = MinimalPCG32::seed_from_u64(73);
        let mut b = MinimalPCG32::seed_from_u64(73);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn distinct_seeds_diverge() {
        let mut a = MinimalPCG32::from_seed(2u64.to_le_bytes());
        let mut b = MinimalPCG32::from_seed(73u64.to_le_bytes());
        let a_stream: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let b_stream: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(a_stream, b_stream);
    }
}
