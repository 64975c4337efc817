//! Main application state management

use std::{
    sync::Mutex,
    time::Instant,
};

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::warn;

use super::{AdvanceResult, TaskQueueStore};

/// Main application state: the queue store behind a lock, plus server
/// metadata and the change channel that cancels pending timer ticks
#[derive(Debug)]
pub struct AppState {
    /// The task queue and run flags; single source of truth
    store: Mutex<TaskQueueStore>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last client action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Every mutation publishes a fresh snapshot here; the countdown loop
    /// races its pending sleep against this channel, so a stale tick can
    /// never fire against superseded state
    pub change_tx: broadcast::Sender<TaskQueueStore>,
}

impl AppState {
    /// Create a new AppState with an empty queue
    pub fn new(port: u16, host: String) -> Self {
        let (change_tx, _) = broadcast::channel(100);

        Self {
            store: Mutex::new(TaskQueueStore::new()),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            change_tx,
        }
    }

    /// Apply a client-requested mutation to the store, record it as the
    /// last action, and broadcast the resulting snapshot
    pub fn update_queue<F, T>(&self, action: &str, updater: F) -> Result<T, String>
    where
        F: FnOnce(&mut TaskQueueStore) -> T,
    {
        let mut store = self
            .store
            .lock()
            .map_err(|e| format!("Failed to lock queue store: {}", e))?;

        let outcome = updater(&mut store);
        let snapshot = store.clone();
        drop(store); // Release the lock before notifying

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        self.broadcast(snapshot);
        Ok(outcome)
    }

    /// Advance the head countdown by one second on behalf of the timer
    /// loop. Ticks broadcast like any other mutation but are not recorded
    /// as client actions.
    pub fn advance_head(&self) -> Result<AdvanceResult, String> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| format!("Failed to lock queue store: {}", e))?;

        let result = store.advance_head_by_second();
        let snapshot = store.clone();
        drop(store);

        self.broadcast(snapshot);
        Ok(result)
    }

    /// Force the run out of the active state; used when a tick finds
    /// nothing left to count down
    pub fn halt_run(&self) -> Result<(), String> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| format!("Failed to lock queue store: {}", e))?;

        store.run.stop();
        let snapshot = store.clone();
        drop(store);

        self.broadcast(snapshot);
        Ok(())
    }

    /// Get a snapshot of the current queue and run state
    pub fn snapshot(&self) -> Result<TaskQueueStore, String> {
        self.store
            .lock()
            .map(|store| store.clone())
            .map_err(|e| format!("Failed to lock queue store: {}", e))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn broadcast(&self, snapshot: TaskQueueStore) {
        // Send fails only when no receiver is alive, e.g. before the
        // countdown task has subscribed; nothing to cancel in that case
        if let Err(e) = self.change_tx.send(snapshot) {
            warn!("No listeners for state change notification: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_queue_records_last_action() {
        let state = AppState::new(0, "127.0.0.1".to_string());
        state
            .update_queue("add", |store| store.add_task("A", 0, 5))
            .unwrap()
            .unwrap();

        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("add"));
        assert!(time.is_some());
        assert_eq!(state.snapshot().unwrap().tasks.len(), 1);
    }

    #[test]
    fn mutations_broadcast_fresh_snapshots() {
        let state = AppState::new(0, "127.0.0.1".to_string());
        let mut rx = state.change_tx.subscribe();

        state
            .update_queue("add", |store| store.add_task("A", 0, 5))
            .unwrap()
            .unwrap();
        let snapshot = rx.try_recv().unwrap();
        assert_eq!(snapshot.tasks.len(), 1);

        state.advance_head().unwrap();
        let snapshot = rx.try_recv().unwrap();
        assert_eq!(snapshot.tasks[0].seconds_left, 4);
    }
}
