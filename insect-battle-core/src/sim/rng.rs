//! RNG helpers shared by every draw point in the battle.
//!
//! All draws go through [`roll_unit`], so any [`rand::RngCore`] can drive a
//! battle. [`ScriptedRng`] replays a fixed list of unit draws.

use rand::{Error, Rng, RngCore};

/// Uniform draw in `[0, 1)`.
pub fn roll_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

/// Uniform integer in `lo..=hi`.
pub fn roll_between<R: Rng + ?Sized>(rng: &mut R, lo: u8, hi: u8) -> u8 {
    let span = u32::from(hi.saturating_sub(lo)) + 1;
    let offset = ((roll_unit(rng) * span as f64) as u32).min(span - 1);
    lo + offset as u8
}

/// Cumulative-weight roulette. Returns `None` for an empty or all-zero list.
pub fn weighted_index<R: Rng + ?Sized>(rng: &mut R, weights: &[f64]) -> Option<usize> {
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if weights.is_empty() || total <= 0.0 {
        return None;
    }
    let mut remaining = roll_unit(rng) * total;
    for (idx, weight) in weights.iter().enumerate() {
        if *weight <= 0.0 {
            continue;
        }
        remaining -= weight;
        if remaining <= 0.0 {
            return Some(idx);
        }
    }
    weights.iter().rposition(|w| *w > 0.0)
}

/// Deterministic source that yields a fixed, cycling sequence of unit draws.
///
/// Each value is encoded so that `Rng::gen::<f64>()` returns it exactly.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(draws: Vec<f64>) -> Self {
        let draws = if draws.is_empty() { vec![0.0] } else { draws };
        Self { draws, cursor: 0 }
    }

    /// Every draw returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

const FLOAT_BITS: u32 = 53;

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.draws[self.cursor % self.draws.len()].clamp(0.0, 1.0 - f64::EPSILON);
        self.cursor += 1;
        let mantissa = (value * (1u64 << FLOAT_BITS) as f64) as u64;
        mantissa << (64 - FLOAT_BITS)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn scripted_rng_round_trips_unit_values() {
        let mut rng = ScriptedRng::new(vec![0.5, 0.25, 0.0]);
        assert_eq!(roll_unit(&mut rng), 0.5);
        assert_eq!(roll_unit(&mut rng), 0.25);
        assert_eq!(roll_unit(&mut rng), 0.0);
        assert_eq!(roll_unit(&mut rng), 0.5);
        assert_eq!(rng.consumed(), 4);
    }

    #[test]
    fn roll_between_covers_bounds() {
        let mut low = ScriptedRng::constant(0.0);
        let mut high = ScriptedRng::constant(0.999);
        assert_eq!(roll_between(&mut low, 2, 4), 2);
        assert_eq!(roll_between(&mut high, 2, 4), 4);
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            let n = roll_between(&mut rng, 1, 3);
            assert!((1..=3).contains(&n));
        }
    }

    #[test]
    fn weighted_index_skips_zero_weights() {
        let mut rng = ScriptedRng::constant(0.0);
        assert_eq!(weighted_index(&mut rng, &[0.0, 5.0, 5.0]), Some(1));
        let mut rng = ScriptedRng::constant(0.75);
        assert_eq!(weighted_index(&mut rng, &[0.0, 5.0, 5.0]), Some(2));
        assert_eq!(weighted_index(&mut rng, &[0.0, 0.0]), None);
        assert_eq!(weighted_index(&mut rng, &[]), None);
    }

    #[test]
    fn works_through_trait_objects() {
        let mut inner = ScriptedRng::constant(0.5);
        let rng: &mut dyn RngCore = &mut inner;
        assert_eq!(roll_unit(&mut *rng), 0.5);
        assert_eq!(roll_between(&mut *rng, 1, 3), 2);
    }
}
