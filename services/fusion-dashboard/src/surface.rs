//! Rendering surface: the page regions the refresher writes into

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::model::ConnectivityState;

/// Page regions written by the refresher, named after their element IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    TotalAlerts,
    LastAlert,
    ClassStats,
    AlertsContainer,
}

impl Region {
    /// The DOM element ID of this region
    pub fn id(&self) -> &'static str {
        match self {
            Region::TotalAlerts => "total-alerts",
            Region::LastAlert => "last-alert",
            Region::ClassStats => "class-stats",
            Region::AlertsContainer => "alerts-container",
        }
    }
}

/// DOM element ID of the connectivity indicator
pub const STATUS_ID: &str = "status";

/// Target of every region update
#[async_trait]
pub trait RenderSurface: Send + Sync {
    /// Replace a region's content with plain text
    async fn set_text(&self, region: Region, text: String);

    /// Replace a region's content with an HTML fragment
    async fn set_html(&self, region: Region, html: String);

    /// Update the connectivity indicator's text and styling
    async fn set_status(&self, state: ConnectivityState);
}

/// Current markup of every region, as served to browsers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRegions {
    pub total_alerts: String,
    pub last_alert: String,
    pub class_stats: String,
    pub alerts_container: String,
    pub status_text: String,
    pub status_class: String,
}

impl Default for PageRegions {
    fn default() -> Self {
        Self {
            total_alerts: "0".to_string(),
            last_alert: "-".to_string(),
            class_stats: LOADING_PLACEHOLDER.to_string(),
            alerts_container: LOADING_PLACEHOLDER.to_string(),
            status_text: "Conectando...".to_string(),
            status_class: "status".to_string(),
        }
    }
}

impl PageRegions {
    fn region_mut(&mut self, region: Region) -> &mut String {
        match region {
            Region::TotalAlerts => &mut self.total_alerts,
            Region::LastAlert => &mut self.last_alert,
            Region::ClassStats => &mut self.class_stats,
            Region::AlertsContainer => &mut self.alerts_container,
        }
    }
}

/// Shown in both panels until the first poll lands
pub const LOADING_PLACEHOLDER: &str = r#"<div class="loading">Cargando...</div>"#;

/// In-memory surface shared between the refresher and the page server
#[derive(Debug, Clone, Default)]
pub struct PageSurface {
    regions: Arc<RwLock<PageRegions>>,
}

impl PageSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all regions at this instant
    pub async fn snapshot(&self) -> PageRegions {
        self.regions.read().await.clone()
    }
}

#[async_trait]
impl RenderSurface for PageSurface {
    async fn set_text(&self, region: Region, text: String) {
        tracing::debug!("#{} <- text ({} bytes)", region.id(), text.len());
        *self.regions.write().await.region_mut(region) = escape_text(&text);
    }

    async fn set_html(&self, region: Region, html: String) {
        tracing::debug!("#{} <- html ({} bytes)", region.id(), html.len());
        *self.regions.write().await.region_mut(region) = html;
    }

    async fn set_status(&self, state: ConnectivityState) {
        tracing::debug!("#{} <- {}", STATUS_ID, state);
        let mut regions = self.regions.write().await;
        regions.status_text = state.label().to_string();
        regions.status_class = state.css_class().to_string();
    }
}

/// Text content is stored as markup, so the characters HTML treats
/// specially are escaped on the way in.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
