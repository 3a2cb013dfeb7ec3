//! OS signal handling.

/// Wait for a termination request: Ctrl+C everywhere, plus SIGTERM on unix
/// (the signal the orchestrator sends before killing the pod).
pub async fn wait_for_termination() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Termination signal received, shutting down gracefully");
}
