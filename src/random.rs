use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

const MULTIPLIER_A: i64 = 1103515245;
const INCREMENT_C: i64 = 12345;
const MODULUS: i64 = i32::MAX as i64;
const DEFAULT_SEED: i64 = 3819201;

/// Source of randomness for the search.
///
/// One generator is owned by the engine and drives both the choice of which untried move to
/// expand and the moves played during rollouts. Seed it explicitly for reproducible searches.
pub trait RandomGenerator {
    fn next(&mut self) -> u32;

    /// Returns a value in `from..to`. `to` must be greater than `from`.
    fn next_range(&mut self, from: usize, to: usize) -> usize;

    /// Picks an element uniformly at random, or `None` if `items` is empty.
    fn pick<'a, K>(&mut self, items: &'a [K]) -> Option<&'a K> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_range(0, items.len()))
    }
}

impl<G: RandomGenerator> RandomGenerator for &mut G {
    fn next(&mut self) -> u32 {
        (**self).next()
    }

    fn next_range(&mut self, from: usize, to: usize) -> usize {
        (**self).next_range(from, to)
    }
}

/// Wraps [`StdRng`]. `Default` seeds from the operating system; use
/// [`StandardRandomGenerator::seeded`] for reproducible runs.
pub struct StandardRandomGenerator {
    rng: StdRng,
}

impl StandardRandomGenerator {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StandardRandomGenerator {
    fn default() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomGenerator for StandardRandomGenerator {
    fn next(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_range(&mut self, from: usize, to: usize) -> usize {
        self.rng.random_range(from..to)
    }
}

/// A small linear congruential generator. Fully deterministic and identical across platforms.
pub struct CustomNumberGenerator {
    seed: i64,
}

impl Default for CustomNumberGenerator {
    fn default() -> Self {
        CustomNumberGenerator::new(DEFAULT_SEED)
    }
}

impl RandomGenerator for CustomNumberGenerator {
    fn next(&mut self) -> u32 {
        self.seed = (self.seed * MULTIPLIER_A + INCREMENT_C) % MODULUS;
        self.seed as u32
    }

    fn next_range(&mut self, from: usize, to: usize) -> usize {
        (self.next() as usize % (to - from)) + from
    }
}

impl CustomNumberGenerator {
    pub const fn new(seed: i64) -> Self {
        Self {
            seed: seed.rem_euclid(MODULUS),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::random::{CustomNumberGenerator, RandomGenerator, StandardRandomGenerator};

    #[test]
    fn outputs_same_numbers() {
        let mut crg = CustomNumberGenerator::new(42);
        assert_eq!(crg.next_range(0, 10), 8);
        assert_eq!(crg.next_range(0, 10), 4);
        assert_eq!(crg.next_range(0, 10), 1);
        assert_eq!(crg.next_range(0, 10), 2);
        assert_eq!(crg.next_range(0, 10), 4);
    }

    #[test]
    fn pick_should_be_same() {
        let vec = vec![432, 6542, 534, 6, 13, 645, 88, 2352, 345, 2667, 8287];
        let mut crg = CustomNumberGenerator::default();
        assert_eq!(crg.pick(&vec), Some(&6));
        assert_eq!(crg.pick(&vec), Some(&2667));
        assert_eq!(crg.pick(&vec), Some(&534));
        assert_eq!(crg.pick(&vec), Some(&8287));
        assert_eq!(crg.pick(&vec), Some(&6));
    }

    #[test]
    fn pick_from_empty_slice() {
        let empty: Vec<u8> = Vec::new();
        let mut crg = CustomNumberGenerator::default();
        assert_eq!(crg.pick(&empty), None);
    }

    #[test]
    fn negative_and_huge_seeds_stay_in_range() {
        for seed in [-1, i64::MIN, i64::MAX] {
            let mut crg = CustomNumberGenerator::new(seed);
            for _ in 0..100 {
                assert!(crg.next_range(3, 7) >= 3);
                assert!(crg.next_range(3, 7) < 7);
            }
        }
    }

    #[test]
    fn borrowed_generator_advances_the_original() {
        fn draw<R: RandomGenerator>(mut random: R) -> usize {
            random.next_range(0, 10)
        }

        let mut owned = CustomNumberGenerator::new(42);
        assert_eq!(draw(&mut owned), 8);
        assert_eq!(owned.next_range(0, 10), 4);
    }

    #[test]
    fn seeded_standard_generators_agree() {
        let mut a = StandardRandomGenerator::seeded(11);
        let mut b = StandardRandomGenerator::seeded(11);
        for _ in 0..20 {
            assert_eq!(a.next(), b.next());
            assert_eq!(a.next_range(0, 1000), b.next_range(0, 1000));
        }
    }
}
