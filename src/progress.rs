//! # Progress — Atomic Search Progress Counters
//!
//! Lock-free counters shared between search lanes and the optional status
//! reporter. Every lane bumps `tested` once per candidate, the coordinator
//! bumps `found` for the winner, and a lane that walks off the end of its
//! range bumps `exhausted`.
//!
//! ## Background Reporter
//!
//! [`Progress::start_reporter`] spawns a thread that logs tested count,
//! rate and elapsed time at a fixed interval. It polls the shutdown flag every
//! [`SHUTDOWN_POLL`] so that `stop()` followed by `join()` returns promptly
//! instead of waiting out a whole interval.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

/// Granularity at which the reporter notices `stop()`.
pub const SHUTDOWN_POLL: Duration = Duration::from_millis(50);

pub struct Progress {
    pub tested: AtomicU64,
    pub found: AtomicU64,
    pub exhausted: AtomicU64,
    start: Instant,
    shutdown: AtomicBool,
}

impl Progress {
    pub fn new() -> Arc<Self> {
        Arc::new(Progress {
            tested: AtomicU64::new(0),
            found: AtomicU64::new(0),
            exhausted: AtomicU64::new(0),
            start: Instant::now(),
            shutdown: AtomicBool::new(false),
        })
    }

    pub fn start_reporter(self: &Arc<Self>, interval: Duration) -> thread::JoinHandle<()> {
        let progress = Arc::clone(self);
        thread::spawn(move || {
            let mut last_report = Instant::now();
            while !progress.shutdown.load(Ordering::Relaxed) {
                thread::sleep(SHUTDOWN_POLL.min(interval));
                if last_report.elapsed() >= interval {
                    progress.print_status();
                    last_report = Instant::now();
                }
            }
        })
    }

    pub fn print_status(&self) {
        let elapsed = self.start.elapsed();
        let tested = self.tested.load(Ordering::Relaxed);
        let found = self.found.load(Ordering::Relaxed);
        let exhausted = self.exhausted.load(Ordering::Relaxed);
        let rate = if elapsed.as_secs_f64() > 0.0 {
            tested as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        let h = elapsed.as_secs() / 3600;
        let m = (elapsed.as_secs() % 3600) / 60;
        let s = elapsed.as_secs() % 60;
        info!(
            tested,
            rate = format_args!("{:.2}", rate),
            found,
            exhausted_lanes = exhausted,
            elapsed = format_args!("{:02}:{:02}:{:02}", h, m, s),
            "search progress"
        );
    }

    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}
