//! Task value type

use serde::{Deserialize, Serialize};

/// A queued task: its configured duration and the live countdown value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Display name shown to clients
    pub name: String,
    /// Configured minutes component of the duration
    pub total_minutes: u64,
    /// Configured seconds component of the duration
    pub total_seconds: u64,
    /// Seconds remaining; counts down while this task is the queue head
    pub seconds_left: u64,
}

impl Task {
    /// Create a new task with a full countdown
    pub fn new(name: impl Into<String>, minutes: u64, seconds: u64) -> Self {
        Self {
            name: name.into(),
            total_minutes: minutes,
            total_seconds: seconds,
            seconds_left: minutes * 60 + seconds,
        }
    }

    /// The configured duration in seconds
    pub fn total_duration_seconds(&self) -> u64 {
        self.total_minutes * 60 + self.total_seconds
    }
}
