//! # Main — CLI Entry Point
//!
//! Parses arguments, installs logging and hands off to [`cli::run`].
//!
//! ## Options
//!
//! - `DIGITS`: decimal digit count of the prime (default 1000).
//! - `--workers` / `MAKEPRIME_WORKERS`: lanes per direction (default 2 × cores).
//! - `--timeout-secs` / `MAKEPRIME_TIMEOUT_SECS`: search deadline (default 30).
//! - `--seed` / `MAKEPRIME_SEED`: reproducible start point.
//! - `--twin`: require `p + 2` to be a probable prime as well.
//! - `--progress-secs`: periodic progress log (0 = off).
//! - `--json`: machine-readable result on stdout.
//! - `--qos`: macOS QoS P-core scheduling via `pthread_set_qos_class_self_np`.
//!
//! Logs go to stderr (`LOG_FORMAT=json` for JSON lines, `RUST_LOG` to filter);
//! stdout carries only the result.

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "makeprime",
    about = "Find a random probable prime with the requested number of decimal digits"
)]
struct Cli {
    /// Number of decimal digits in the prime (must be greater than 1)
    #[arg(default_value_t = 1000, allow_negative_numbers = true)]
    digits: i64,

    /// Search lanes per direction (defaults to twice the logical cores)
    #[arg(long, env = "MAKEPRIME_WORKERS")]
    workers: Option<usize>,

    /// Give up after this many seconds
    #[arg(long, env = "MAKEPRIME_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Seed for the start-point generator (OS entropy if not set)
    #[arg(long, env = "MAKEPRIME_SEED")]
    seed: Option<u64>,

    /// Search for a twin pair: p and p + 2 both probable primes
    #[arg(long)]
    twin: bool,

    /// Log search progress every N seconds (0 disables)
    #[arg(long, default_value_t = 0)]
    progress_secs: u64,

    /// Print the result as a single JSON object
    #[arg(long)]
    json: bool,

    /// Set macOS QoS class to user-initiated for lane threads (P-core scheduling on Apple Silicon)
    #[arg(long)]
    qos: bool,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    cli::run(&cli)
}
