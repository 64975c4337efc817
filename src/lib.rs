//! Time Tracker - A state-managed HTTP server for sequential task countdowns
//!
//! This library provides an ordered task queue with per-second countdown
//! semantics, a drift-correcting timer loop that drives it, and an HTTP API
//! plus desktop notifications on task and queue completion.

pub mod api;
pub mod config;
pub mod notify;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
