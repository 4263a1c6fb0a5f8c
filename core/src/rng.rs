//! Deterministic random number generation for synthetic registers.
//!
//! RULE: Nothing here may call a platform RNG. Every draw flows from the
//! seed passed in, so the same seed always yields the same register.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

pub struct RegisterRng {
    inner: Pcg64Mcg,
}

impl RegisterRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll an i64 in [lo, hi].
    pub fn next_in_range(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(lo <= hi, "empty range {lo}..={hi}");
        lo + self.next_u64_below((hi - lo + 1) as u64) as i64
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    pub fn pick<'a>(&mut self, options: &'a [String]) -> &'a str {
        if options.is_empty() {
            return "";
        }
        let i = self.next_u64_below(options.len() as u64) as usize;
        &options[i]
    }
}
