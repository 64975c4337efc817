//! Countdown background task
//!
//! Drives the queue head forward once per elapsed real second while the run
//! is active. Each tick is a one-shot sleep scheduled to the next whole
//! second of the run rather than a fixed interval, so scheduling delay does
//! not accumulate into drift.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::{sync::broadcast, time::sleep};
use tracing::{debug, error, info};

use crate::{
    notify::Notifier,
    state::{AdvanceResult, AppState, TaskQueueStore},
};

/// Delay until the next whole-second boundary of a run started at
/// `started_at`. The result is always in (0, 1000] milliseconds: late
/// callbacks shorten the next delay instead of pushing every later tick back.
pub fn next_tick_delay(started_at: Instant, now: Instant) -> Duration {
    let drift = now.duration_since(started_at).as_millis() as u64 % 1000;
    Duration::from_millis(1000 - drift)
}

/// Background task that runs the countdown whenever the run state becomes
/// active and cancels its pending tick on every superseding state change
pub async fn countdown_task(state: Arc<AppState>, notifier: Arc<dyn Notifier>) {
    info!("Starting countdown task");

    let mut state_rx = state.change_tx.subscribe();

    loop {
        // Wait for a state change notification
        match state_rx.recv().await {
            Ok(snapshot) => {
                if !snapshot.run.is_active {
                    debug!(
                        "Countdown idle: run inactive, {} tasks queued",
                        snapshot.tasks.len()
                    );
                    continue;
                }
                run_countdown(&state, notifier.as_ref(), &mut state_rx).await;
            }
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                debug!("Countdown task lagged behind {} state changes", missed);
            }
            Err(e) => {
                error!("Error receiving state change: {}", e);
                sleep(Duration::from_secs(1)).await;
            }
        }
    }
}

/// Inner tick loop: schedules one drift-corrected sleep at a time and races
/// it against further state changes, so a mutation always cancels the stale
/// tick before it can fire
async fn run_countdown(
    state: &AppState,
    notifier: &dyn Notifier,
    state_rx: &mut broadcast::Receiver<TaskQueueStore>,
) {
    info!("Run active, starting countdown loop");

    loop {
        let started_at = match state.snapshot() {
            Ok(snapshot) if snapshot.run.is_active => snapshot.run.started_at,
            Ok(_) => {
                debug!("Run no longer active, leaving countdown loop");
                return;
            }
            Err(e) => {
                error!("Failed to read queue state: {}", e);
                return;
            }
        };
        let Some(started_at) = started_at else {
            error!("Run active without a tick origin, halting");
            if let Err(e) = state.halt_run() {
                error!("Failed to halt run: {}", e);
            }
            return;
        };

        let delay = next_tick_delay(started_at, Instant::now());

        tokio::select! {
            // Tick: advance the head by one second
            _ = sleep(delay) => {
                match state.advance_head() {
                    Ok(AdvanceResult::Ticked { remaining }) => {
                        debug!("Tick: {} seconds left on head task", remaining);
                    }
                    Ok(AdvanceResult::Advanced { finished, next }) => {
                        info!("Task '{}' finished, next up: '{}'", finished, next);
                        notifier.notify(
                            &format!("{} is done", finished),
                            &format!("Next up: {}", next),
                        );
                    }
                    Ok(AdvanceResult::Finished { finished }) => {
                        info!("Task '{}' finished, queue drained", finished);
                        notifier.notify(
                            &format!("{} is done", finished),
                            "All tasks complete. Time is up!",
                        );
                        return;
                    }
                    Ok(AdvanceResult::Idle) => {
                        // Active run over an empty queue; should be
                        // unreachable since deleting the head stops the run
                        if let Err(e) = state.halt_run() {
                            error!("Failed to halt idle run: {}", e);
                        }
                        return;
                    }
                    Err(e) => {
                        error!("Failed to advance countdown: {}", e);
                        return;
                    }
                }
            }

            // State change: the pending tick is superseded
            changed = state_rx.recv() => {
                match changed {
                    Ok(snapshot) => {
                        if !snapshot.run.is_active {
                            info!("Run paused or stopped, cancelling pending tick");
                            return;
                        }
                        // Queue mutated mid-run: drop the stale tick and
                        // reschedule from the live state
                        debug!("State changed mid-run, rescheduling tick");
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        debug!("Countdown loop lagged behind {} state changes", missed);
                    }
                    Err(e) => {
                        error!("Error receiving state change: {}", e);
                        return;
                    }
                }
            }
        }
    }
}
