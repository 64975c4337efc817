//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{RunState, Task};

/// API response structure for queue mutation endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub tasks: Vec<Task>,
    pub run: RunState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, tasks: Vec<Task>, run: RunState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            tasks,
            run,
        }
    }

    /// Create a success response
    pub fn ok(message: String, tasks: Vec<Task>, run: RunState) -> Self {
        Self::new("ok".to_string(), message, tasks, run)
    }

    /// Create an error response
    pub fn error(message: String, tasks: Vec<Task>, run: RunState) -> Self {
        Self::new("error".to_string(), message, tasks, run)
    }
}

/// Full status response with queue, run flags and server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub tasks: Vec<Task>,
    pub run: RunState,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
