//! Shutdown signal handling.

use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Cancel the token on SIGTERM or interrupt. Kubernetes sends SIGTERM on
/// pod shutdown; Ctrl-C covers runs outside a pod.
pub async fn cancel_on_signal(shutdown: CancellationToken) {
    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = sigterm.recv() => info!("received SIGTERM, terminating"),
                _ = tokio::signal::ctrl_c() => info!("received interrupt, terminating"),
            }
        }
        Err(err) => {
            error!("cannot install SIGTERM handler: {err}");
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("received interrupt, terminating");
            }
        }
    }
    shutdown.cancel();
}
