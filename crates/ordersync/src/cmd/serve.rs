//! Serve command - Run reports on their schedules
//!
//! Reports with a `schedule` run one at a time until SIGINT or SIGTERM.
//! A run in progress finishes before the scheduler stops.

use anyhow::{Context, Result};
use ordersync_config::{Config, Credentials};
use ordersync_pipeline::{LiveRunner, ReportScheduler};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Run the serve command
pub async fn run(config: Config) -> Result<()> {
    let scheduler = ReportScheduler::from_config(&config)?;
    if scheduler.is_empty() {
        anyhow::bail!(
            "no enabled report has a schedule - add `schedule = \"0 0 6 * * *\"` to a report"
        );
    }
    let credentials = Credentials::from_env(&config).context("failed to resolve credentials")?;
    let runner = LiveRunner::new(config, credentials);

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        wait_for_shutdown().await;
        info!("shutdown signal received, stopping scheduler...");
        shutdown.cancel();
    });

    scheduler.run(&runner, cancel).await;
    info!("ordersync shutdown complete");
    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
