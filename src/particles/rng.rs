//! Uniform random source for particle sampling.
//! Browser builds seed from `crypto.getRandomValues` (via `getrandom`); a fixed
//! seed from the page config makes the field reproducible.

/// Anything that yields uniform floats in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform float in `[min, max)`.
    fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform index in `0..len`; `len == 0` yields 0.
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }
}

/// xorshift64* generator. Not crypto secure, only used for visuals.
#[derive(Clone, Debug)]
pub struct XorShift {
    state: u64,
}

impl XorShift {
    pub fn new(seed: u64) -> Self {
        Self { state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed } }
    }

    /// Seed from the platform entropy source. Falls back to the performance
    /// clock if entropy is unavailable.
    pub fn from_entropy() -> Self {
        let mut buf = [0u8; 8];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => Self::new(u64::from_le_bytes(buf)),
            Err(e) => {
                log::warn!("getrandom unavailable ({e}), seeding from clock");
                Self::new(crate::performance_now().to_bits())
            }
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

impl RandomSource for XorShift {
    fn next_f64(&mut self) -> f64 {
        // top 53 bits -> [0, 1)
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_f64_stays_in_unit_interval() {
        let mut rng = XorShift::new(7);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = XorShift::new(42);
        let mut b = XorShift::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn zero_seed_is_not_stuck() {
        let mut rng = XorShift::new(0);
        let first = rng.next_f64();
        let second = rng.next_f64();
        assert_ne!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn index_covers_all_slots() {
        let mut rng = XorShift::new(99);
        let mut hits = [0usize; 5];
        for _ in 0..5_000 {
            hits[rng.index(5)] += 1;
        }
        assert!(hits.iter().all(|&h| h > 0), "{hits:?}");
        assert_eq!(rng.index(0), 0);
    }
}
