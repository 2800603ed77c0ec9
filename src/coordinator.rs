//! # Coordinator — Racing Lanes Against a Deadline
//!
//! Owns one search from validation to return:
//!
//! 1. Validate the digit count (before touching the random source).
//! 2. Build `[10^(d-1), 10^d)` and draw an odd start point.
//! 3. Build a dedicated rayon pool with one thread per lane and spawn `w`
//!    forward plus `w` backward lanes inside `in_place_scope`.
//! 4. Block on the result channel for at most `deadline`.
//! 5. Set the cancellation flag. The scope then waits for every lane to
//!    notice it, so no lane outlives the call on either the found or the
//!    timed-out path.
//!
//! ## Exhaustion
//!
//! The coordinator keeps the slot's sender alive for the whole race, so if
//! every lane runs off its range without a hit the wait still ends at the
//! deadline and reports [`SearchError::Timeout`]. For realistic digit counts
//! the range holds astronomically many primes and this never happens.

use rayon::ThreadPool;
use rug::Integer;
use std::sync::atomic::Ordering;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::anchor::{self, GmpRandom, RandomSource};
use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::exact_digits;
use crate::progress::Progress;
use crate::range::SearchRange;
use crate::signal::{self, CancellationFlag};
use crate::worker::{self, Direction, Lane, Winner};

/// A successful search.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub prime: Integer,
    pub digits: u64,
    pub lane: Lane,
    pub workers_per_direction: usize,
    pub tested: u64,
    pub elapsed: Duration,
}

/// Raw result of one race from a fixed start, including instrumentation.
#[derive(Debug)]
pub struct Race {
    pub winner: Option<Winner>,
    /// Number of writes to the result slot; never more than one.
    pub deliveries: usize,
    pub tested: u64,
    pub exhausted_lanes: u64,
    pub elapsed: Duration,
}

/// Find a probable prime with exactly `digits` decimal digits using the
/// default configuration and an entropy-seeded start point.
pub fn generate_large_prime(digits: i64) -> Result<Integer> {
    let config = SearchConfig::default();
    let mut rng = GmpRandom::from_entropy();
    generate_large_prime_with(digits, &config, &mut rng).map(|outcome| outcome.prime)
}

/// Find a probable prime with exactly `digits` decimal digits.
pub fn generate_large_prime_with(
    digits: i64,
    config: &SearchConfig,
    rng: &mut dyn RandomSource,
) -> Result<SearchOutcome> {
    let digits = validate_digits(digits)?;
    let range = SearchRange::for_digits(digits)?;
    search_range(&range, config, rng)
}

/// Check a requested digit count: it must be at least 2 and fit in `u32`.
pub fn validate_digits(digits: i64) -> Result<u32> {
    if digits <= 1 {
        return Err(SearchError::InvalidArgument(format!(
            "number of digits must be greater than 1, got {}",
            digits
        )));
    }
    u32::try_from(digits).map_err(|_| {
        SearchError::InvalidArgument(format!("number of digits {} is too large", digits))
    })
}

/// Search an arbitrary range from a randomly drawn start point.
pub fn search_range(
    range: &SearchRange,
    config: &SearchConfig,
    rng: &mut dyn RandomSource,
) -> Result<SearchOutcome> {
    config.validate()?;
    let start = anchor::pick_start(range, rng);
    info!(
        bits = range.upper.significant_bits(),
        lanes = config.total_workers(),
        mode = config.mode.as_str(),
        deadline_secs = config.deadline.as_secs_f64(),
        "search starting"
    );

    let race = race(range, &start, config)?;
    match race.winner {
        Some(Winner { prime, lane }) => {
            let digits = exact_digits(&prime);
            info!(
                digits,
                direction = ?lane.direction,
                lane = lane.index,
                tested = race.tested,
                elapsed_ms = race.elapsed.as_millis() as u64,
                "probable prime found"
            );
            Ok(SearchOutcome {
                prime,
                digits,
                lane,
                workers_per_direction: config.workers_per_direction,
                tested: race.tested,
                elapsed: race.elapsed,
            })
        }
        None => {
            warn!(
                tested = race.tested,
                exhausted_lanes = race.exhausted_lanes,
                deadline_secs = config.deadline.as_secs_f64(),
                "search timed out"
            );
            Err(SearchError::Timeout(config.deadline))
        }
    }
}

/// Run `2w` lanes from `start` until one delivers or the deadline passes.
///
/// Returns only after every lane has exited.
pub fn race(range: &SearchRange, start: &Integer, config: &SearchConfig) -> Result<Race> {
    config.validate()?;
    let workers = config.workers_per_direction;
    let pool = build_pool(config.total_workers(), config.qos)?;

    let flag = CancellationFlag::new();
    let (slot, results) = signal::result_slot::<Winner>();
    let progress = Progress::new();
    let reporter = config
        .progress_interval
        .map(|interval| progress.start_reporter(interval));
    let started = Instant::now();

    let winner = pool.in_place_scope(|scope| {
        for direction in [Direction::Forward, Direction::Backward] {
            for index in 0..workers {
                let lane = Lane {
                    direction,
                    index,
                    stride_count: workers,
                };
                let (flag, slot, progress) = (&flag, &slot, &progress);
                scope.spawn(move |_| {
                    if let Some(prime) = worker::scan(lane, range, start, config.mode, flag, progress) {
                        slot.deliver(Winner { prime, lane });
                    }
                });
            }
        }

        let winner = results.recv_timeout(config.deadline).ok();
        flag.set();
        debug!(found = winner.is_some(), "cancellation signalled, joining lanes");
        winner
    });
    let elapsed = started.elapsed();
    // A lane that claimed the flag just as the deadline passed delivers after
    // the wait gave up; every lane has been joined, so the slot is final here.
    let winner = winner.or_else(|| results.try_recv().ok());

    if winner.is_some() {
        progress.found.fetch_add(1, Ordering::Relaxed);
    }
    progress.stop();
    if let Some(handle) = reporter {
        join_reporter(handle);
    }

    Ok(Race {
        winner,
        deliveries: slot.deliveries(),
        tested: progress.tested.load(Ordering::Relaxed),
        exhausted_lanes: progress.exhausted.load(Ordering::Relaxed),
        elapsed,
    })
}

fn join_reporter(handle: JoinHandle<()>) {
    if handle.join().is_err() {
        warn!("progress reporter thread panicked");
    }
}

/// One thread per lane, so every lane makes progress concurrently.
fn build_pool(threads: usize, qos: bool) -> Result<ThreadPool> {
    let builder = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("makeprime-lane-{}", i));

    #[cfg(target_os = "macos")]
    if qos {
        let pool = builder
            .spawn_handler(|thread| {
                let mut b = std::thread::Builder::new();
                if let Some(name) = thread.name() {
                    b = b.name(name.to_owned());
                }
                b.spawn(move || {
                    // SAFETY: pthread_set_qos_class_self_np is a well-defined macOS API
                    // that sets the QoS class for the current thread. No memory safety concerns.
                    unsafe {
                        libc::pthread_set_qos_class_self_np(
                            libc::qos_class_t::QOS_CLASS_USER_INITIATED,
                            0,
                        );
                    }
                    thread.run();
                })?;
                Ok(())
            })
            .build()?;
        debug!("lane threads configured with macOS QoS: user-initiated");
        return Ok(pool);
    }

    #[cfg(not(target_os = "macos"))]
    if qos {
        warn!("--qos is only effective on macOS, ignoring");
    }

    Ok(builder.build()?)
}
