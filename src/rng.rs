//! Pseudo-random numbers for the games
//!
//! Games only ask for two things: a position or offset in an inclusive range
//! and a random direction. [`GameRng`] is seeded from
//! [`Config::seed`](crate::config::Config::seed), so two engines built from
//! the same configuration see the same food, block and alien draws.

// Full-period 32-bit linear congruential generator
const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;

/// Seeded random source shared by the games of one engine
#[derive(Debug, Clone)]
pub struct GameRng {
    state: u32,
}

impl GameRng {
    /// Start a sequence from `seed`
    ///
    /// Every seed, zero included, yields a full-period sequence.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }

    /// Draw a value in `min..=max`
    ///
    /// Only the upper half of the state is used; the lower bits repeat with
    /// short periods. Returns `min` when `max <= min`.
    pub fn range(&mut self, min: i16, max: i16) -> i16 {
        if max <= min {
            return min;
        }
        let span = (i32::from(max) - i32::from(min) + 1) as u32;
        let offset = (self.step() >> 16) % span;
        (i32::from(min) + offset as i32) as i16
    }

    /// Draw a direction, `-1` or `1`
    pub fn sign(&mut self) -> i16 {
        1 - 2 * self.range(0, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;

    #[test]
    fn test_configured_seed_replays_draws() {
        let config = Builder::new().seed(0x5EED).build().unwrap();
        let mut first = GameRng::new(config.seed);
        let mut second = GameRng::new(config.seed);

        for _ in 0..64 {
            assert_eq!(first.range(0, 63), second.range(0, 63));
            assert_eq!(first.sign(), second.sign());
        }
    }

    #[test]
    fn test_seeds_diverge() {
        let mut a = GameRng::new(1);
        let mut b = GameRng::new(2);
        let a_draws: [i16; 8] = core::array::from_fn(|_| a.range(0, 7));
        let b_draws: [i16; 8] = core::array::from_fn(|_| b.range(0, 7));
        assert_ne!(a_draws, b_draws);
    }

    #[test]
    fn test_zero_seed_still_varies() {
        let mut rng = GameRng::new(0);
        let draws: [i16; 16] = core::array::from_fn(|_| rng.range(0, 7));
        assert!(draws.iter().any(|value| *value != draws[0]));
    }

    #[test]
    fn test_food_cells_cover_the_grid() {
        let mut rng = GameRng::new(7);
        let mut seen = [false; 64];
        for _ in 0..2000 {
            let cell = rng.range(0, 63);
            assert!((0..=63).contains(&cell));
            seen[cell as usize] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn test_narrow_and_negative_ranges() {
        let mut rng = GameRng::new(7);
        let mut seen = [false; 2];
        for _ in 0..100 {
            let column = rng.range(3, 4);
            assert!((3..=4).contains(&column));
            seen[(column - 3) as usize] = true;
            assert!((-3..=-1).contains(&rng.range(-3, -1)));
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn test_degenerate_range_returns_min() {
        let mut rng = GameRng::new(7);
        assert_eq!(rng.range(4, 4), 4);
        assert_eq!(rng.range(5, 2), 5);
    }

    #[test]
    fn test_sign_produces_both_directions() {
        let mut rng = GameRng::new(99);
        let signs: [i16; 32] = core::array::from_fn(|_| rng.sign());
        assert!(signs.iter().all(|s| *s == 1 || *s == -1));
        assert!(signs.contains(&1));
        assert!(signs.contains(&-1));
    }
}
