//! Demo: wire the coordinator to Ctrl+C and drain a few subsystems
//!
//! Run: cargo run --example graceful
//! Then press Ctrl+C and watch the cleanup actions drain in order.

use std::time::Duration;

use eyre::Result;
use offramp::Coordinator;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cancel = CancellationToken::new();
    let coordinator = Coordinator::new(
        cancel.clone(),
        |err| error!(%err, "shutdown cleanup failed"),
        Duration::from_secs(5),
    );

    coordinator
        .register_named("flush-metrics", |_shutdown| async move {
            info!("flushing metrics");
            tokio::time::sleep(Duration::from_millis(200)).await;
            info!("metrics flushed");
            Ok(())
        })
        .await;

    coordinator
        .register_named("close-connections", |shutdown| async move {
            info!("closing connections");
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(500)) => {
                    info!("connections closed");
                }
                _ = shutdown.cancelled() => {
                    info!("grace period expired, dropping remaining connections");
                }
            }
            Ok(())
        })
        .await;

    info!("running, press Ctrl+C to shut down");
    tokio::signal::ctrl_c().await?;
    cancel.cancel();

    // The drain runs on a background task; hold main open long enough for
    // the full grace period before the process exits.
    tokio::time::sleep(Duration::from_secs(6)).await;
    Ok(())
}
