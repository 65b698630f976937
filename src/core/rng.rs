// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f};

pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.state >> 32) as u32
    }

    /// Uniform in [0, 1).
    pub fn next_f32(&mut self) -> Float {
        (self.next_u32() >> 8) as Float * (1.0 / (1u32 << 24) as Float)
    }

    pub fn next_2d(&mut self) -> Vector2f {
        let x = self.next_f32();
        let y = self.next_f32();
        Vector2f::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::LcgRng;

    #[test]
    fn test_range_and_mean() {
        let mut rng = LcgRng::new(7);
        let n = 10000;
        let mut sum = 0.0f64;
        for _ in 0..n {
            let v = rng.next_f32();
            assert!(v >= 0.0 && v < 1.0);
            sum += v as f64;
        }
        let mean = sum / n as f64;
        assert!((mean - 0.5).abs() < 0.02, "mean = {}", mean);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = LcgRng::new(42);
        let mut b = LcgRng::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }
}
