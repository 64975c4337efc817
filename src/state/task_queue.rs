//! Task queue store
//!
//! Holds the ordered task list plus the single run state instance, and
//! implements every state transition the timer loop and the HTTP API can
//! request. Only the task at index 0 (the head) ever counts down.

use std::time::Instant;

use thiserror::Error;

use super::{RunState, Task};

/// Errors returned by queue operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Add/edit requested with a zero total duration; recoverable by
    /// re-submitting with a nonzero duration
    #[error("task duration must be at least one second")]
    EmptyDuration,
    /// Edit/delete on an index no longer present; a client bug rather than
    /// a user error
    #[error("task index {index} out of range (queue holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Outcome of one per-second advance of the queue head
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceResult {
    /// Queue is empty, nothing to do; the caller should stop running
    Idle,
    /// Head decremented, countdown continues
    Ticked { remaining: u64 },
    /// Head expired and the next task took over, already one second in
    Advanced { finished: String, next: String },
    /// The last task expired and the queue is drained
    Finished { finished: String },
}

/// The ordered task queue plus run flags
#[derive(Debug, Clone, Default)]
pub struct TaskQueueStore {
    pub tasks: Vec<Task>,
    pub run: RunState,
}

impl TaskQueueStore {
    /// Create an empty, stopped store
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            run: RunState::new(),
        }
    }

    /// Append a new task with a full countdown; clears the done flag
    pub fn add_task(&mut self, name: &str, minutes: u64, seconds: u64) -> Result<Task, QueueError> {
        if minutes == 0 && seconds == 0 {
            return Err(QueueError::EmptyDuration);
        }
        let task = Task::new(name, minutes, seconds);
        self.tasks.push(task.clone());
        self.run.is_done = false;
        Ok(task)
    }

    /// Replace the task at `index` with a newly computed task value,
    /// preserving queue position. The countdown restarts from the new
    /// duration; the old task value is discarded rather than mutated.
    pub fn edit_task(
        &mut self,
        index: usize,
        name: &str,
        minutes: u64,
        seconds: u64,
    ) -> Result<Task, QueueError> {
        if minutes == 0 && seconds == 0 {
            return Err(QueueError::EmptyDuration);
        }
        if index >= self.tasks.len() {
            return Err(QueueError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        let task = Task::new(name, minutes, seconds);
        self.tasks[index] = task.clone();
        Ok(task)
    }

    /// Remove the task at `index`. Deleting the head discards the active
    /// countdown context, so the run is stopped first; deleting any other
    /// index leaves run state untouched.
    pub fn delete_task(&mut self, index: usize) -> Result<Task, QueueError> {
        if index >= self.tasks.len() {
            return Err(QueueError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        if index == 0 {
            self.run.stop();
        }
        Ok(self.tasks.remove(index))
    }

    /// Restore the head task's countdown to its configured total and force
    /// the run into the stopped state. No-op on an empty queue.
    pub fn reset_head(&mut self) {
        let Some(head) = self.tasks.first_mut() else {
            return;
        };
        head.seconds_left = head.total_duration_seconds();
        self.run.stop();
    }

    /// Play/pause control. Starting from stopped or paused records a fresh
    /// tick origin; resuming therefore excludes paused time from drift
    /// accounting. Toggling over an empty queue never activates.
    pub fn toggle_run(&mut self, now: Instant) -> RunState {
        if self.tasks.is_empty() {
            self.run.is_active = false;
        } else if self.run.is_active {
            self.run.pause();
        } else {
            self.run.start(now);
        }
        self.run.clone()
    }

    /// Advance the head countdown by one elapsed second.
    ///
    /// A head that reaches zero on this tick expires immediately: the next
    /// task is promoted and the same second is counted against it as well,
    /// matching the original rollover behavior. Draining the last task sets
    /// the done flag and stops the run.
    pub fn advance_head_by_second(&mut self) -> AdvanceResult {
        if self.tasks.is_empty() {
            return AdvanceResult::Idle;
        }
        let head = &mut self.tasks[0];
        if head.seconds_left > 0 {
            head.seconds_left -= 1;
            if head.seconds_left > 0 {
                return AdvanceResult::Ticked {
                    remaining: head.seconds_left,
                };
            }
        }
        let finished = self.tasks.remove(0);
        match self.tasks.first_mut() {
            Some(next) => {
                next.seconds_left = next.seconds_left.saturating_sub(1);
                AdvanceResult::Advanced {
                    finished: finished.name,
                    next: next.name.clone(),
                }
            }
            None => {
                self.run.stop();
                self.run.is_done = true;
                AdvanceResult::Finished {
                    finished: finished.name,
                }
            }
        }
    }
}
