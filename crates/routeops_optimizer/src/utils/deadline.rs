use std::time::{Duration, Instant};

use jiff::SignedDuration;

/// Wall-clock cap on a search. Negative budgets are treated as already expired.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started_at: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn new(budget: SignedDuration) -> Self {
        Deadline {
            started_at: Instant::now(),
            budget: Duration::try_from(budget).unwrap_or(Duration::ZERO),
        }
    }

    pub fn unlimited() -> Self {
        Deadline {
            started_at: Instant::now(),
            budget: Duration::MAX,
        }
    }

    #[inline]
    pub fn is_reached(&self) -> bool {
        self.started_at.elapsed() >= self.budget
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}
