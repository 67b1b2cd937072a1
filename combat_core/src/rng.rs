//! CombatRng - Seeded random source for damage spread and AI decisions

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Pseudo-random source owned by the host and passed into the engine
///
/// Seeded once when created and never reseeded. Not cryptographically strong.
#[derive(Debug, Clone)]
pub struct CombatRng {
    inner: ChaCha8Rng,
}

impl CombatRng {
    /// Create a deterministic generator from a seed
    pub fn seeded(seed: u64) -> Self {
        CombatRng {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        CombatRng {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Uniform integer in `[a, b]` inclusive
    ///
    /// # Panics
    /// If `a > b`.
    pub fn uniform(&mut self, a: i32, b: i32) -> i32 {
        assert!(a <= b, "uniform called with empty range [{}, {}]", a, b);
        self.inner.gen_range(a..=b)
    }

    /// True with probability `percent / 100`
    ///
    /// Values at or below 0 never succeed, values at or above 100 always do.
    pub fn chance(&mut self, percent: i32) -> bool {
        self.uniform(1, 100) <= percent
    }
}

impl Default for CombatRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_stays_in_range() {
        let mut rng = CombatRng::seeded(7);
        for _ in 0..1000 {
            let v = rng.uniform(-2, 2);
            assert!((-2..=2).contains(&v));
        }
    }

    #[test]
    fn test_uniform_single_value() {
        let mut rng = CombatRng::seeded(7);
        assert_eq!(rng.uniform(5, 5), 5);
    }

    #[test]
    fn test_uniform_hits_both_bounds() {
        let mut rng = CombatRng::seeded(99);
        let draws: Vec<i32> = (0..500).map(|_| rng.uniform(1, 3)).collect();
        assert!(draws.contains(&1));
        assert!(draws.contains(&3));
    }

    #[test]
    #[should_panic]
    fn test_uniform_rejects_inverted_range() {
        let mut rng = CombatRng::seeded(1);
        rng.uniform(3, 1);
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = CombatRng::seeded(3);
        for _ in 0..200 {
            assert!(rng.chance(100));
            assert!(!rng.chance(0));
        }
    }

    #[test]
    fn test_chance_rate_roughly_matches() {
        let mut rng = CombatRng::seeded(12345);
        let hits = (0..10_000).filter(|_| rng.chance(25)).count();
        // 25% of 10k, with generous tolerance
        assert!((2000..3000).contains(&hits), "hits = {}", hits);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = CombatRng::seeded(42);
        let mut b = CombatRng::seeded(42);
        for _ in 0..50 {
            assert_eq!(a.uniform(0, 1000), b.uniform(0, 1000));
        }
    }
}
