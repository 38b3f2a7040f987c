//! Refresher: fetches the Fusion API and repaints the page regions

use std::fmt;
use std::sync::Arc;

use chrono::{Local, TimeZone};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::io::HttpClient;
use crate::model::{AlertFeed, ConnectivityState, StatsSnapshot};
use crate::render;
use crate::surface::{Region, RenderSurface};

/// Outcome of one poll cycle, one flag per sub-fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    pub stats_ok: bool,
    pub alerts_ok: bool,
}

/// Polls the statistics and alerts endpoints and writes the results into a
/// [`RenderSurface`]. Timestamps are displayed in `Tz`.
pub struct DashboardRefresher<Tz: TimeZone = Local> {
    http: Arc<dyn HttpClient>,
    surface: Arc<dyn RenderSurface>,
    stats_url: String,
    alerts_url: String,
    tz: Tz,
}

impl<Tz: TimeZone> fmt::Debug for DashboardRefresher<Tz> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardRefresher")
            .field("stats_url", &self.stats_url)
            .field("alerts_url", &self.alerts_url)
            .finish()
    }
}

impl DashboardRefresher<Local> {
    pub fn new(
        api: &ApiConfig,
        http: Arc<dyn HttpClient>,
        surface: Arc<dyn RenderSurface>,
    ) -> Self {
        let stats_url = api.stats_url();
        let alerts_url = api.alerts_url();
        tracing::debug!(
            "Created DashboardRefresher for {} and {}",
            stats_url,
            alerts_url
        );
        Self {
            http,
            surface,
            stats_url,
            alerts_url,
            tz: Local,
        }
    }
}

impl<Tz> DashboardRefresher<Tz>
where
    Tz: TimeZone + Send + Sync,
    Tz::Offset: fmt::Display,
{
    /// Display timestamps in another time zone
    pub fn with_time_zone<Tz2: TimeZone>(self, tz: Tz2) -> DashboardRefresher<Tz2> {
        DashboardRefresher {
            http: self.http,
            surface: self.surface,
            stats_url: self.stats_url,
            alerts_url: self.alerts_url,
            tz,
        }
    }

    /// Run one poll cycle.
    ///
    /// Both sub-fetches run concurrently and each repaints its own regions as
    /// soon as it completes. Returns after both have finished; a failure in
    /// one never cancels the other.
    pub async fn refresh_once(&self) -> CycleOutcome {
        let stats = async {
            let result = self.fetch_stats().await;
            self.apply_stats(result).await
        };
        let alerts = async {
            let result = self.fetch_alerts().await;
            self.apply_alerts(result).await
        };
        let (stats_ok, alerts_ok) = tokio::join!(stats, alerts);
        tracing::debug!("Poll cycle done: stats_ok={}, alerts_ok={}", stats_ok, alerts_ok);
        CycleOutcome {
            stats_ok,
            alerts_ok,
        }
    }

    /// `GET /stats`
    pub async fn fetch_stats(&self) -> crate::Result<StatsSnapshot> {
        self.get_json(&self.stats_url).await
    }

    /// `GET /alerts?limit=N`
    pub async fn fetch_alerts(&self) -> crate::Result<AlertFeed> {
        self.get_json(&self.alerts_url).await
    }

    /// Write a stats result into the page, returning whether it succeeded.
    ///
    /// On success the counter, label and class panel are repainted and the
    /// indicator is left alone. On failure only the indicator changes.
    pub async fn apply_stats(&self, result: crate::Result<StatsSnapshot>) -> bool {
        match result {
            Ok(stats) => {
                let total = stats.total_alerts().to_string();
                let last_alert = render::render_last_alert(&stats, &self.tz);
                let class_stats = render::render_class_stats(&stats);

                self.surface.set_text(Region::TotalAlerts, total).await;
                self.surface.set_text(Region::LastAlert, last_alert).await;
                self.surface.set_html(Region::ClassStats, class_stats).await;
                true
            }
            Err(e) => {
                tracing::warn!("Failed to fetch statistics: {}", e);
                self.surface
                    .set_status(ConnectivityState::Disconnected)
                    .await;
                false
            }
        }
    }

    /// Write an alerts result into the page, returning whether it succeeded.
    ///
    /// Success repaints the list and marks the service connected; failure
    /// swaps the list for the error panel and marks it disconnected.
    pub async fn apply_alerts(&self, result: crate::Result<AlertFeed>) -> bool {
        match result {
            Ok(feed) => {
                let html = render::render_alerts(feed.alerts(), &self.tz);
                self.surface.set_html(Region::AlertsContainer, html).await;
                self.surface.set_status(ConnectivityState::Connected).await;
                true
            }
            Err(e) => {
                tracing::warn!("Failed to fetch alerts: {}", e);
                self.surface
                    .set_html(
                        Region::AlertsContainer,
                        render::ALERTS_ERROR_PANEL.to_string(),
                    )
                    .await;
                self.surface
                    .set_status(ConnectivityState::Disconnected)
                    .await;
                false
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> crate::Result<T> {
        let response = self.http.get(url).await?;
        if !response.is_success() {
            return Err(crate::DashboardError::Fetch(format!(
                "GET {} returned status {}",
                url, response.status
            )));
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}
