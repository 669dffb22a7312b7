//! Polling worker for periodic refresh

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::sync::refresher::{RefreshOutcome, RefreshTrigger, Refresher};

/// Poller worker options
#[derive(Debug, Clone)]
pub struct Options {
    /// Polling interval
    pub interval: Duration,

    /// Delay before the first refresh, leaving the proxy route time to bind
    pub initial_delay: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            initial_delay: Duration::from_millis(250),
        }
    }
}

/// Run the poller worker
///
/// Refreshes once after the initial delay, then every `interval` until shutdown.
pub async fn run<S, F>(
    options: &Options,
    refresher: &Refresher,
    sleep_fn: S,
    mut shutdown_signal: Pin<Box<dyn Future<Output = ()> + Send>>,
) where
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    info!("Poller worker starting...");

    tokio::select! {
        _ = &mut shutdown_signal => {
            info!("Poller worker shutting down...");
            return;
        }
        _ = sleep_fn(options.initial_delay) => {}
    }

    loop {
        debug!("Polling for deployment updates...");

        tokio::select! {
            _ = &mut shutdown_signal => {
                info!("Poller worker shutting down...");
                return;
            }
            result = refresher.trigger_refresh(RefreshTrigger::Poll) => match result {
                Ok(RefreshOutcome::Refreshed { generation }) => {
                    debug!("Refresh {} completed", generation);
                }
                Ok(outcome) => debug!("Refresh skipped: {:?}", outcome),
                Err(e) => error!("Refresh failed: {}", e),
            }
        }

        tokio::select! {
            _ = &mut shutdown_signal => {
                info!("Poller worker shutting down...");
                return;
            }
            _ = sleep_fn(options.interval) => {}
        }
    }
}
