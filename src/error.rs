use std::time::Duration;
use thiserror::Error;

/// Failures surfaced by a prime search.
///
/// Arithmetic never fails here: every candidate is a validated positive odd
/// integer, so the only outcomes are a bad request, a missed deadline, or the
/// OS refusing to give us threads.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no probable prime found within {0:?}")]
    Timeout(Duration),

    #[error("could not build search thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, SearchError>;
