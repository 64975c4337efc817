//! Completion notifications
//!
//! The countdown reports task and queue completion through the `Notifier`
//! trait so the delivery mechanism stays swappable: desktop popups in
//! normal operation, log lines in quiet mode, a recording stub in tests.

use tracing::{info, warn};

/// Output collaborator for completion messages
pub trait Notifier: Send + Sync {
    fn notify(&self, summary: &str, body: &str);
}

/// Desktop notifications via the OS notification daemon
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, summary: &str, body: &str) {
        let result = notify_rust::Notification::new()
            .summary(summary)
            .body(body)
            .appname("time-tracker")
            .icon("alarm-clock")
            .show();

        if let Err(e) = result {
            warn!("Failed to show desktop notification: {}", e);
        }
    }
}

/// Log-only notifier for quiet mode and headless environments
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, summary: &str, body: &str) {
        info!("Notification: {} - {}", summary, body);
    }
}
