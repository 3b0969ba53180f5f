//! Resource limits of a single query.

use std::time::{Duration, Instant};

use crate::config::EngineConfig;

/// Limits on conflicts and time, fixed at the start of a query.
pub struct ResourceLimit {
    start: Instant,
    time: Option<Duration>,
    conflict_budget: usize,
    conflicts_at_start: usize,
}

impl ResourceLimit {
    pub fn new(config: &EngineConfig, conflicts_at_start: usize) -> Self {
        let time = match config.time_limit.value.is_zero() {
            true => None,
            false => Some(config.time_limit.value),
        };
        ResourceLimit {
            start: Instant::now(),
            time,
            conflict_budget: config.conflict_limit.value,
            conflicts_at_start,
        }
    }

    /// A reason the query should stop, if any.
    pub fn exceeded(&self, conflicts: usize) -> Option<&'static str> {
        if conflicts.saturating_sub(self.conflicts_at_start) > self.conflict_budget {
            return Some("max. conflicts");
        }
        if self.time.is_some_and(|limit| self.start.elapsed() > limit) {
            return Some("timeout");
        }
        None
    }
}
