//! Shared test helpers for integration tests.

#![allow(dead_code)]

use makeprime::anchor::{GmpRandom, RandomSource};
use makeprime::range::SearchRange;
use rug::Integer;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Random source that counts how many draws it served.
pub struct CountingSource {
    inner: GmpRandom,
    pub draws: Arc<AtomicUsize>,
}

impl CountingSource {
    pub fn seeded(seed: u64) -> Self {
        CountingSource {
            inner: GmpRandom::seeded(seed),
            draws: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn draws(&self) -> usize {
        self.draws.load(Ordering::SeqCst)
    }
}

impl RandomSource for CountingSource {
    fn below(&mut self, bound: &Integer) -> Integer {
        self.draws.fetch_add(1, Ordering::SeqCst);
        self.inner.below(bound)
    }
}

/// `[1328, 1360)`: every odd number in it is composite (1327 and 1361 are
/// consecutive primes) and none is a base-2 strong pseudoprime.
pub fn prime_free_range() -> SearchRange {
    SearchRange::new(Integer::from(1328u32), Integer::from(1360u32))
        .expect("valid crafted range")
}

/// Count of decimal digits, via string conversion.
pub fn decimal_len(n: &Integer) -> usize {
    n.to_string_radix(10).len()
}
