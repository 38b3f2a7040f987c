//! Repeating poll timer with an explicit start/stop lifecycle

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::TimeZone;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::refresher::DashboardRefresher;

/// Owns the periodic task that drives a [`DashboardRefresher`].
///
/// The first cycle starts immediately, then one per interval. Every tick
/// spawns its own cycle, so a slow request never delays the next tick and
/// cycles may overlap. Stopping cancels the ticker and aborts cycles still in
/// flight; once [`RefreshTimer::stop`] returns no further request is issued.
pub struct RefreshTimer {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl fmt::Debug for RefreshTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshTimer")
            .field("running", &self.is_running())
            .finish()
    }
}

impl RefreshTimer {
    /// Start polling. Must be called from within a tokio runtime.
    pub fn start<Tz>(refresher: Arc<DashboardRefresher<Tz>>, interval: Duration) -> Self
    where
        Tz: TimeZone + Send + Sync + 'static,
        Tz::Offset: fmt::Display,
    {
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        tracing::info!("Starting refresh timer every {:?}", interval);
        let handle = tokio::spawn(async move {
            tick_loop(refresher, interval, task_cancel).await;
        });
        Self {
            cancel,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Stop the timer. Only the first call does anything.
    pub async fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        self.cancel.cancel();
        if let Err(e) = handle.await {
            tracing::warn!("Refresh timer task ended abnormally: {}", e);
        }
        tracing::info!("Refresh timer stopped");
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn tick_loop<Tz>(
    refresher: Arc<DashboardRefresher<Tz>>,
    interval: Duration,
    cancel: CancellationToken,
) where
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: fmt::Display,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut in_flight = JoinSet::new();

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Refresh timer cancelled");
                break;
            }
            _ = ticker.tick() => {
                while in_flight.try_join_next().is_some() {}
                if !in_flight.is_empty() {
                    tracing::debug!("{} earlier poll cycle(s) still in flight", in_flight.len());
                }
                let refresher = Arc::clone(&refresher);
                in_flight.spawn(async move {
                    refresher.refresh_once().await;
                });
            }
        }
    }

    in_flight.shutdown().await;
}
