//! # Oracle — Probable-Primality Verdicts
//!
//! Pure functions mapping an odd candidate `n > 11` to a yes/no verdict.
//! Every stage short-circuits on the first "composite" answer:
//!
//! 1. **Quick filter**: trial division by the constant table
//!    [`QUICK_FILTER_PRIMES`].
//! 2. **Fermat base 2**: `2^(n-1) ≡ 1 (mod n)`.
//! 3. **Miller–Rabin, single witness 2**: strong probable-prime test on
//!    `n - 1 = d·2^r`.
//!
//! [`accepts`] adds a Fermat test to base 3 on top of [`is_probable_prime`];
//! it is what the search lanes actually call.
//!
//! ## Known Weakness
//!
//! One Miller–Rabin witness is far weaker than the usual multi-round test.
//! The base-3 Fermat check removes base-2 strong pseudoprimes such as
//! 2047 = 23·89, but Carmichael numbers that are also strong pseudoprimes to
//! base 2 (29341 = 13·37·61 is the smallest) pass every stage. For random
//! candidates of cryptographic size these are vanishingly rare.
//!
//! ## References
//!
//! - Gary L. Miller, "Riemann's Hypothesis and Tests for Primality",
//!   J. Comput. System Sci. 13(3):300–317, 1976.
//! - Michael O. Rabin, "Probabilistic Algorithm for Testing Primality",
//!   J. Number Theory 12(1):128–138, 1980.

use rug::Integer;

/// Small primes for the trial-division pre-filter.
pub const QUICK_FILTER_PRIMES: [u32; 4] = [3, 5, 7, 11];

/// The single Miller–Rabin witness (also the first Fermat base).
pub const MR_WITNESS: u32 = 2;

/// Second Fermat base, applied by [`accepts`].
pub const AUX_FERMAT_BASE: u32 = 3;

/// True when `n` has no factor in [`QUICK_FILTER_PRIMES`].
pub fn passes_quick_filter(n: &Integer) -> bool {
    !QUICK_FILTER_PRIMES.iter().any(|&p| n.is_divisible_u(p))
}

/// Fermat test: `base^(n-1) mod n == 1`.
///
/// A `false` result proves `n` composite; `true` is only evidence.
pub fn fermat_test(n: &Integer, base: u32) -> bool {
    let n_minus_1 = Integer::from(n - 1u32);
    Integer::from(base)
        .pow_mod(&n_minus_1, n)
        .map_or(false, |r| r == 1u32)
}

/// Strong probable-prime test for a single witness.
///
/// Writes `n - 1 = d·2^r` with `d` odd, then checks whether `witness^d ≡ ±1`
/// or `witness^(d·2^j) ≡ -1 (mod n)` for some `0 < j < r`.
pub fn strong_probable_prime(n: &Integer, witness: u32) -> bool {
    let n_minus_1 = Integer::from(n - 1u32);
    let r = match n_minus_1.find_one(0) {
        Some(r) => r,
        None => return false,
    };
    let d = Integer::from(&n_minus_1 >> r);

    let mut x = match Integer::from(witness).pow_mod(&d, n) {
        Ok(x) => x,
        Err(_) => return false,
    };
    if x == 1u32 || x == n_minus_1 {
        return true;
    }

    for _ in 1..r {
        x.square_mut();
        x %= n;
        if x == n_minus_1 {
            return true;
        }
    }
    false
}

/// Probable-primality verdict for odd `n > 11`: quick filter, Fermat base 2,
/// then single-witness Miller–Rabin base 2.
pub fn is_probable_prime(n: &Integer) -> bool {
    passes_quick_filter(n) && fermat_test(n, MR_WITNESS) && strong_probable_prime(n, MR_WITNESS)
}

/// Acceptance test used by search lanes: [`is_probable_prime`] plus a Fermat
/// test to base [`AUX_FERMAT_BASE`].
pub fn accepts(n: &Integer) -> bool {
    is_probable_prime(n) && fermat_test(n, AUX_FERMAT_BASE)
}

/// Twin-pair acceptance: both `n` and `n + 2` pass [`accepts`].
pub fn accepts_twin(n: &Integer) -> bool {
    accepts(n) && accepts(&Integer::from(n + 2u32))
}
