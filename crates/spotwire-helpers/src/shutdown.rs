use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Cancels `token` on the first SIGTERM or SIGINT.
///
/// Falls back to plain ctrl-c when the unix signal streams cannot be
/// installed (or off unix entirely).
pub async fn listen_shutdown(token: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let streams = signal(SignalKind::terminate())
            .and_then(|term| signal(SignalKind::interrupt()).map(|int| (term, int)));

        match streams {
            Ok((mut sigterm, mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => warn!("shutdown signal received: SIGTERM"),
                    _ = sigint.recv() => warn!("shutdown signal received: SIGINT"),
                }
                token.cancel();
                return;
            }
            Err(err) => {
                warn!("failed to install signal handlers: error={err}");
            }
        }
    }

    if tokio::signal::ctrl_c().await.is_ok() {
        warn!("shutdown signal received: SIGINT");
        token.cancel();
    }
}
