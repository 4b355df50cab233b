/// Mulberry32: deterministic 32-bit PRNG.
/// Pure function: returns (value_in_0_1, next_state).
pub fn prng_next(state: u32) -> (f64, u32) {
    let mut t = state.wrapping_add(0x6d2b79f5);
    let next_state = t;
    t = (t ^ (t >> 15)).wrapping_mul(t | 1);
    t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
    let value = (t ^ (t >> 14)) as f64 / 4294967296.0;
    (value, next_state)
}

/// Returns a random integer in [min, max] inclusive.
pub fn prng_int_range(state: u32, min: i32, max: i32) -> (i32, u32) {
    let (value, next_state) = prng_next(state);
    let range = (max - min + 1) as f64;
    (min + (value * range).floor() as i32, next_state)
}

/// Stateful wrapper used by the level generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prng {
    state: u32,
}

impl Prng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    /// Uniform in [0, 1).
    pub fn value(&mut self) -> f64 {
        let (v, next) = prng_next(self.state);
        self.state = next;
        v
    }

    /// Uniform in [min, max). Returns `min` when the range is empty.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        let v = self.value();
        if max <= min {
            return min;
        }
        min + v * (max - min)
    }

    /// Uniform integer in [min, max] inclusive.
    pub fn int_range(&mut self, min: i32, max: i32) -> i32 {
        let (v, next) = prng_int_range(self.state, min, max);
        self.state = next;
        v
    }

    pub fn chance(&mut self, p: f64) -> bool {
        self.value() < p
    }

    /// ±1 with equal odds.
    pub fn sign(&mut self) -> f64 {
        if self.value() > 0.5 {
            1.0
        } else {
            -1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prng_deterministic() {
        let (v1, s1) = prng_next(12345);
        let (v2, s2) = prng_next(12345);
        assert_eq!(v1, v2);
        assert_eq!(s1, s2);
    }

    #[test]
    fn prng_range_0_to_1() {
        let mut state = 42u32;
        for _ in 0..1000 {
            let (value, next) = prng_next(state);
            assert!((0.0..1.0).contains(&value), "value out of range: {}", value);
            state = next;
        }
    }

    #[test]
    fn mulberry32_reference_vectors() {
        let (v, s) = prng_next(0);
        assert_eq!(v, 0.26642920868471265);
        assert_eq!(s, 1831565813);
        let (v, s) = prng_next(s);
        assert_eq!(v, 0.0003297457005828619);
        assert_eq!(s, 3663131626);

        let (v, s) = prng_next(42);
        assert_eq!(v, 0.6011037519201636);
        assert_eq!(s, 1831565855);
        let (v, _) = prng_next(s);
        assert_eq!(v, 0.44829055899754167);
    }

    #[test]
    fn int_range_inclusive_and_matches_pure_fn() {
        let mut rng = Prng::new(42);
        let (v, s) = prng_int_range(42, 0, 3);
        assert_eq!(rng.int_range(0, 3), v);
        assert_eq!(rng.state(), s);

        let mut rng = Prng::new(99);
        for _ in 0..1000 {
            let v = rng.int_range(0, 1);
            assert!((0..=1).contains(&v), "value out of range: {}", v);
        }
    }

    #[test]
    fn float_range_bounds() {
        let mut rng = Prng::new(7);
        for _ in 0..1000 {
            let v = rng.range(-3.0, 3.0);
            assert!((-3.0..3.0).contains(&v), "value out of range: {}", v);
        }
        assert_eq!(rng.range(2.0, 2.0), 2.0);
    }

    #[test]
    fn sign_is_unit() {
        let mut rng = Prng::new(1);
        for _ in 0..100 {
            assert_eq!(rng.sign().abs(), 1.0);
        }
    }
}
