//! # CLI Execution
//!
//! Kept out of `main.rs` so the entry point stays slim: maps arguments onto a
//! [`SearchConfig`], runs the search and prints the result.

use anyhow::Result;
use makeprime::anchor::{GmpRandom, RandomSource};
use makeprime::worker::Lane;
use makeprime::{generate_large_prime_with, validate_digits, SearchConfig, SearchMode, SearchOutcome};
use serde::Serialize;
use std::time::Duration;
use tracing::info;

use super::Cli;

/// Machine-readable result for `--json`.
#[derive(Serialize)]
struct Report<'a> {
    prime: String,
    digits: u64,
    mode: SearchMode,
    workers_per_direction: usize,
    lanes: usize,
    winning_lane: &'a Lane,
    tested: u64,
    elapsed_secs: f64,
}

fn config_from(cli: &Cli) -> SearchConfig {
    let mut config = SearchConfig::default()
        .with_deadline(Duration::from_secs(cli.timeout_secs))
        .with_mode(if cli.twin {
            SearchMode::Twin
        } else {
            SearchMode::Prime
        })
        .with_qos(cli.qos);
    if let Some(workers) = cli.workers {
        config = config.with_workers(workers);
    }
    if cli.progress_secs > 0 {
        config = config.with_progress_interval(Some(Duration::from_secs(cli.progress_secs)));
    }
    config
}

/// Run one search and print the result.
pub fn run(cli: &Cli) -> Result<()> {
    // Reject bad digit counts before printing anything.
    let digits = validate_digits(cli.digits)?;
    let config = config_from(cli);
    config.validate()?;

    let mut rng: Box<dyn RandomSource> = match cli.seed {
        Some(seed) => {
            info!(seed, "using seeded start point");
            Box::new(GmpRandom::seeded(seed))
        }
        None => Box::new(GmpRandom::from_entropy()),
    };

    if !cli.json {
        println!("--- Finding a {}-digit {} ---", digits, noun(config.mode));
        println!(
            "Using {} workers per direction ({} lanes) for parallel search...",
            config.workers_per_direction,
            config.total_workers()
        );
    }

    let outcome = generate_large_prime_with(i64::from(digits), &config, rng.as_mut())?;

    if cli.json {
        print_json(&outcome, &config)?;
    } else {
        print_text(&outcome, config.mode);
    }
    Ok(())
}

fn noun(mode: SearchMode) -> &'static str {
    match mode {
        SearchMode::Prime => "prime",
        SearchMode::Twin => "twin prime pair",
    }
}

fn print_text(outcome: &SearchOutcome, mode: SearchMode) {
    println!();
    println!("Found prime:");
    println!("{}", outcome.prime);
    if mode == SearchMode::Twin {
        println!("{}", rug::Integer::from(&outcome.prime + 2u32));
    }
    println!();
    println!("Digits: {}", outcome.digits);
    println!("Time: {:?}", outcome.elapsed);
}

fn print_json(outcome: &SearchOutcome, config: &SearchConfig) -> Result<()> {
    let report = Report {
        prime: outcome.prime.to_string(),
        digits: outcome.digits,
        mode: config.mode,
        workers_per_direction: outcome.workers_per_direction,
        lanes: config.total_workers(),
        winning_lane: &outcome.lane,
        tested: outcome.tested,
        elapsed_secs: outcome.elapsed.as_secs_f64(),
    };
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
