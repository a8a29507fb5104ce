//! Uniform randomness
//!
//! Every randomized decision in the core (asteroid outlines, debris scatter,
//! spawn edges, exhaust flicker) draws from a [`RandomSource`]. Seeding is
//! the host's business.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

pub trait RandomSource {
    /// Uniform float in `[min, max]` (returns `min` when the range is empty)
    fn random_float_in_range(&mut self, min: f32, max: f32) -> f32;
    /// Uniform integer in `[min, max]` inclusive (returns `min` when the range is empty)
    fn random_int_in_range(&mut self, min: i32, max: i32) -> i32;
}

/// PCG-backed random source
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    rng: Pcg32,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRng {
    fn random_float_in_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    fn random_int_in_range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_are_inclusive_and_bounded() {
        let mut rng = SeededRng::new(7);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let edge = rng.random_int_in_range(0, 3);
            seen[edge as usize] = true;
            let f = rng.random_float_in_range(1.0, 2.0);
            assert!((1.0..=2.0).contains(&f));
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_empty_range_returns_min() {
        let mut rng = SeededRng::new(1);
        assert_eq!(rng.random_float_in_range(3.0, 3.0), 3.0);
        assert_eq!(rng.random_int_in_range(5, 2), 5);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeededRng::new(42);
        let mut b = SeededRng::new(42);
        for _ in 0..10 {
            assert_eq!(a.random_float_in_range(0.0, 360.0), b.random_float_in_range(0.0, 360.0));
        }
    }
}
