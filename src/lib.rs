//! # makeprime — Concurrent Probable-Prime Search
//!
//! Finds a random probable prime with a requested number of decimal digits.
//! A random odd start point is drawn inside `[10^(d-1), 10^d)`; `w` forward
//! lanes walk up from it and `w` backward lanes walk down from the top of the
//! range, each stepping over odd candidates with stride `2w`. The first lane
//! to accept a candidate wins a compare-and-swap on a shared flag and
//! delivers the result; every other lane sees the flag and stops.
//!
//! ## Modules
//!
//! | Module | Role |
//! |--------|------|
//! | [`oracle`] | quick filter, Fermat and single-witness Miller–Rabin tests |
//! | [`range`] | digit-length bounds |
//! | [`anchor`] | injectable random start point |
//! | [`signal`] | cancellation flag and single-delivery result slot |
//! | [`worker`] | one search lane |
//! | [`coordinator`] | lane spawning, deadline, structured join |
//! | [`progress`] | atomic counters and background reporter |
//! | [`config`] | worker count, deadline, acceptance mode |

pub mod anchor;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod oracle;
pub mod progress;
pub mod range;
pub mod signal;
pub mod worker;

pub use config::{SearchConfig, SearchMode};
pub use coordinator::{
    generate_large_prime, generate_large_prime_with, search_range, validate_digits, SearchOutcome,
};
pub use error::SearchError;

use rug::Integer;

/// Exact decimal digit count (expensive for very large numbers).
pub fn exact_digits(n: &Integer) -> u64 {
    n.to_string_radix(10).len() as u64
}
