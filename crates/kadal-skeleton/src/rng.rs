//! RNG trait abstraction for footstep placement
//!
//! Lets legs draw their jitter from any `rand::Rng`, so a simulation can
//! run on a seeded generator and tests stay deterministic.

/// Random source used when a leg picks a new foothold
pub trait StepRng {
    /// Uniform value in [0.0, 1.0)
    fn unit_f32(&mut self) -> f32;

    /// Uniform value in [-1.0, 1.0)
    fn signed_unit(&mut self) -> f32 {
        2.0 * self.unit_f32() - 1.0
    }
}

// Blanket implementation for any type implementing rand::Rng
impl<T: ?Sized + rand::Rng> StepRng for T {
    fn unit_f32(&mut self) -> f32 {
        rand::Rng::r#gen(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_unit_f32_range() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(12345);
        for _ in 0..200 {
            let val = rng.unit_f32();
            assert!((0.0..1.0).contains(&val));
        }
    }

    #[test]
    fn test_signed_unit_covers_both_signs() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(12345);
        let mut seen_negative = false;
        let mut seen_positive = false;
        for _ in 0..200 {
            let val = rng.signed_unit();
            assert!((-1.0..1.0).contains(&val));
            seen_negative |= val < 0.0;
            seen_positive |= val > 0.0;
        }
        assert!(seen_negative && seen_positive);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let mut rng1 = Xoshiro256StarStar::seed_from_u64(42);
        let mut rng2 = Xoshiro256StarStar::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(rng1.unit_f32(), rng2.unit_f32());
        }
    }
}
