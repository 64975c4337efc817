//! Run state structure and management

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Run state for the countdown: ticking, stopped, or drained
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// True while the countdown is ticking
    pub is_active: bool,
    /// True when no run has started or a stop/reset occurred since
    pub is_stopped: bool,
    /// True once the queue has been fully drained by expiry (never by deletion)
    pub is_done: bool,
    /// Recorded each time the run transitions into running; drives drift
    /// correction only and is never serialized
    #[serde(skip)]
    pub started_at: Option<Instant>,
}

impl RunState {
    /// Create a fresh stopped state
    pub fn new() -> Self {
        Self {
            is_active: false,
            is_stopped: true,
            is_done: false,
            started_at: None,
        }
    }

    /// Enter the running state, recording a fresh tick origin
    pub fn start(&mut self, now: Instant) {
        self.is_active = true;
        self.is_stopped = false;
        self.started_at = Some(now);
    }

    /// Pause the countdown without discarding its context
    pub fn pause(&mut self) {
        self.is_active = false;
    }

    /// Full stop: the active countdown context is discarded
    pub fn stop(&mut self) {
        self.is_active = false;
        self.is_stopped = true;
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
