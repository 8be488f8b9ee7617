//! OS signal handling.
//!
//! Ctrl-C while results are still in flight triggers shutdown instead of
//! killing the process mid-log.

use tokio::task::JoinHandle;

use crate::lifecycle::Shutdown;

/// Trigger `shutdown` on the first Ctrl-C.
pub fn spawn_ctrl_c_listener(shutdown: Shutdown) -> JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::warn!("Interrupt received, abandoning outstanding requests");
                shutdown.trigger();
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl-C"),
        }
    })
}
