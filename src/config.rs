use rug::Integer;
use serde::Serialize;
use std::time::Duration;

use crate::error::{Result, SearchError};
use crate::oracle;

/// Overall deadline for one search.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// Upper bound on lanes per direction; each lane gets its own OS thread.
pub const MAX_WORKERS_PER_DIRECTION: usize = 4096;

/// Lanes per direction: twice the available parallelism.
pub fn default_workers() -> usize {
    2 * std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(4)
}

/// What a lane accepts as a hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// A single probable prime.
    #[default]
    Prime,
    /// A probable prime `p` with `p + 2` also a probable prime.
    Twin,
}

impl SearchMode {
    pub fn accepts(&self, candidate: &Integer) -> bool {
        match self {
            SearchMode::Prime => oracle::accepts(candidate),
            SearchMode::Twin => oracle::accepts_twin(candidate),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Prime => "prime",
            SearchMode::Twin => "twin",
        }
    }
}

/// Tunables for one search.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Lanes per direction; the search runs twice this many.
    pub workers_per_direction: usize,
    pub deadline: Duration,
    pub mode: SearchMode,
    /// Log progress at this interval; `None` disables the reporter.
    pub progress_interval: Option<Duration>,
    /// macOS: run lane threads at user-initiated QoS (P-cores).
    pub qos: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            workers_per_direction: default_workers(),
            deadline: DEFAULT_DEADLINE,
            mode: SearchMode::Prime,
            progress_interval: None,
            qos: false,
        }
    }
}

impl SearchConfig {
    pub fn with_workers(mut self, workers_per_direction: usize) -> Self {
        self.workers_per_direction = workers_per_direction;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_progress_interval(mut self, interval: Option<Duration>) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_qos(mut self, qos: bool) -> Self {
        self.qos = qos;
        self
    }

    pub fn total_workers(&self) -> usize {
        self.workers_per_direction.saturating_mul(2)
    }

    /// Reject worker counts the search cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.workers_per_direction == 0 {
            return Err(SearchError::InvalidArgument(
                "at least one worker per direction is required".into(),
            ));
        }
        if self.workers_per_direction > MAX_WORKERS_PER_DIRECTION {
            return Err(SearchError::InvalidArgument(format!(
                "at most {} workers per direction are supported, got {}",
                MAX_WORKERS_PER_DIRECTION, self.workers_per_direction
            )));
        }
        Ok(())
    }
}
