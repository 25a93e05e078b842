//! OS signal handling.
//!
//! # Responsibilities
//! - Register handlers for the termination signals (SIGINT, SIGTERM)
//! - Report which signal arrived so shutdown can be attributed in logs
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Installation failure is unrecoverable at startup

/// Block until a termination signal arrives, returning its name.
#[cfg(unix)]
pub async fn wait_for_termination() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt =
        signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");
    let mut terminate =
        signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

    tokio::select! {
        _ = interrupt.recv() => "SIGINT",
        _ = terminate.recv() => "SIGTERM",
    }
}

/// Block until Ctrl+C on platforms without Unix signals.
#[cfg(not(unix))]
pub async fn wait_for_termination() -> &'static str {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    "ctrl_c"
}
