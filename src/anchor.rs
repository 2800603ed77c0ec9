//! # Anchor — Random Start Point
//!
//! Picks the pivot every lane is laid out from. Randomness goes through the
//! [`RandomSource`] trait so tests can replay a search from a fixed seed while
//! production draws its seed from OS entropy.

use rug::integer::Order;
use rug::rand::RandState;
use rug::Integer;

use crate::range::SearchRange;

/// Source of uniformly distributed big integers.
pub trait RandomSource {
    /// Uniform draw from `[0, bound)`. `bound` is always positive.
    fn below(&mut self, bound: &Integer) -> Integer;
}

/// GMP Mersenne-Twister generator.
pub struct GmpRandom {
    state: RandState<'static>,
}

impl GmpRandom {
    /// Deterministic generator: the same seed always yields the same draws.
    pub fn seeded(seed: u64) -> Self {
        let mut state = RandState::new();
        state.seed(&Integer::from(seed));
        GmpRandom { state }
    }

    /// Generator seeded from 256 bits of OS entropy.
    pub fn from_entropy() -> Self {
        let bytes: [u8; 32] = rand::random();
        let mut state = RandState::new();
        state.seed(&Integer::from_digits(&bytes, Order::Lsf));
        GmpRandom { state }
    }
}

impl RandomSource for GmpRandom {
    fn below(&mut self, bound: &Integer) -> Integer {
        bound.clone().random_below(&mut self.state)
    }
}

/// Draw an odd start point inside `[lower, upper)`.
///
/// The uniform offset is added to `lower` and bumped to the next odd number.
/// If that lands on an odd `upper` (crafted ranges only; `10^d` is even) it
/// steps back by two instead.
pub fn pick_start(range: &SearchRange, rng: &mut dyn RandomSource) -> Integer {
    let mut start = rng.below(&range.span()) + &range.lower;
    if start.is_even() {
        start += 1u32;
    }
    if start >= range.upper {
        start -= 2u32;
    }
    start
}
