//! Seedable xorshift32 random source for particle generation

use plexus_core::Vec2;

/// Seedable per-background random source. Each mounted background owns one,
/// so there is no shared global state between fields.
#[derive(Clone, Debug)]
pub struct ParticleRng {
    state: u32,
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Seed from the system clock for non-reproducible runs
    pub fn from_time() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
            .unwrap_or(0xDEAD_BEEF);
        Self::new(nanos)
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits keep the result strictly below 1.0 after conversion
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float in [min, max), or `min` when the range is empty
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + self.next_f32() * (max - min)
    }

    /// Returns a random unit direction in the plane
    pub fn random_direction(&mut self) -> Vec2 {
        Vec2::from_angle(self.range(0.0, std::f32::consts::TAU))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_range_bounds() {
        let mut rng = ParticleRng::new(42);
        for _ in 0..1000 {
            let v = rng.range(0.0, 10.0);
            assert!((0.0..10.0).contains(&v));
        }
    }

    #[test]
    fn rng_empty_range_returns_min() {
        let mut rng = ParticleRng::new(7);
        assert_eq!(rng.range(2.0, 2.0), 2.0);
        assert_eq!(rng.range(3.0, 1.0), 3.0);
    }

    #[test]
    fn rng_direction_unit_length() {
        let mut rng = ParticleRng::new(123);
        for _ in 0..100 {
            let d = rng.random_direction();
            assert!((d.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = ParticleRng::new(99);
        let mut b = ParticleRng::new(99);
        for _ in 0..32 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }

    #[test]
    fn zero_seed_is_not_stuck() {
        let mut rng = ParticleRng::new(0);
        let first = rng.next_f32();
        let second = rng.next_f32();
        assert_ne!(first, second);
    }
}
