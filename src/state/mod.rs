//! State management module
//!
//! This module contains the task queue, run state, and their management logic.

pub mod app_state;
pub mod run_state;
pub mod task;
pub mod task_queue;

// Re-export main types
pub use app_state::AppState;
pub use run_state::RunState;
pub use task::Task;
pub use task_queue::{AdvanceResult, QueueError, TaskQueueStore};
