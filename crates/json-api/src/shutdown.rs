//! Shutdown signals.

use std::{fmt, io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

/// The signal that ended the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShutdownSignal {
    CtrlC,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CtrlC => "ctrl_c",
            Self::Terminate => "terminate",
        })
    }
}

#[cfg(unix)]
async fn terminate() -> Result<(), ShutdownSignalError> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::SigTerm)?
        .recv()
        .await;

    Ok(())
}

#[cfg(not(unix))]
async fn terminate() -> Result<(), ShutdownSignalError> {
    std::future::pending().await
}

/// Wait for Ctrl+C or SIGTERM.
pub(crate) async fn wait_for_signal() -> Result<ShutdownSignal, ShutdownSignalError> {
    tokio::select! {
        result = signal::ctrl_c() => {
            result.map_err(ShutdownSignalError::CtrlC)?;

            Ok(ShutdownSignal::CtrlC)
        }
        result = terminate() => {
            result?;

            Ok(ShutdownSignal::Terminate)
        }
    }
}

/// Stop accepting connections once a signal arrives, giving in-flight
/// requests `grace` to finish.
pub(crate) async fn listen(
    handle: ServerHandle,
    grace: Option<Duration>,
) -> Result<(), ShutdownSignalError> {
    let signal = wait_for_signal().await?;

    info!(%signal, grace_seconds = grace.map(|grace| grace.as_secs()), "shutting down");

    handle.stop_graceful(grace);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_log_by_name() {
        assert_eq!(ShutdownSignal::CtrlC.to_string(), "ctrl_c");
        assert_eq!(ShutdownSignal::Terminate.to_string(), "terminate");
    }
}
