//! Time Tracker - A state-managed HTTP server for sequential task countdowns
//!
//! This is the main entry point for the time-tracker application.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use time_tracker::{
    api::create_router,
    config::Config,
    notify::{DesktopNotifier, LogNotifier, Notifier},
    state::AppState,
    tasks::countdown_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "time_tracker={},tower_http=info",
            config.log_level()
        ))
        .init();

    info!("Starting time-tracker server v1.0.0");
    info!(
        "Configuration: host={}, port={}, quiet={}",
        config.host, config.port, config.quiet
    );

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone()));

    // Completion messages go to the desktop unless quiet mode is on
    let notifier: Arc<dyn Notifier> = if config.quiet {
        Arc::new(LogNotifier)
    } else {
        Arc::new(DesktopNotifier)
    };

    // Start the countdown background task
    let countdown_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_task(countdown_state, notifier).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /tasks        - Queue a task (name, minutes, seconds)");
    info!("  PUT    /tasks/:index - Edit a queued task in place");
    info!("  DELETE /tasks/:index - Delete a queued task");
    info!("  POST   /reset        - Reset the head countdown and stop");
    info!("  POST   /toggle       - Play/pause the countdown");
    info!("  GET    /status       - Check queue and run state");
    info!("  GET    /health       - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
