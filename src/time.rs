//! Cooperative cancellation.
//!
//! Every inner loop of every search checks [`Timer::needs_to_end`] at least
//! once per iteration. There are no suspension points beyond this: the core
//! is single-threaded cooperative within one solve invocation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Wall-clock timer plus a parent-settable "end" flag.
///
/// The flag lets the best-first engine stop every worker once one of them
/// proves optimality, without every worker polling a wall clock against a
/// moving target.
#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
    time_limit: Option<Duration>,
    end: Arc<AtomicBool>,
}

impl Timer {
    /// Starts a timer with an optional wall-clock budget.
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            start: Instant::now(),
            time_limit,
            end: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Time elapsed since the timer started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time remaining before the limit, or `None` if unbounded.
    pub fn remaining_time(&self) -> Option<Duration> {
        self.time_limit.map(|limit| limit.saturating_sub(self.elapsed()))
    }

    /// Whether the search should stop now: either the time limit elapsed or
    /// the shared end flag was set (e.g. by another best-first worker after
    /// a proven-optimal solution).
    pub fn needs_to_end(&self) -> bool {
        if self.end.load(Ordering::Relaxed) {
            return true;
        }
        match self.time_limit {
            Some(limit) => self.elapsed() >= limit,
            None => false,
        }
    }

    /// Cooperatively signals every clone of this timer to stop.
    pub fn request_end(&self) {
        self.end.store(true, Ordering::Relaxed);
    }
}
