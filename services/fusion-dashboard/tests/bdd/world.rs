//! BDD test world for the fusion dashboard

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use cucumber::World;
use fusion_dashboard::io::{HttpClient, HttpResponse};
use fusion_dashboard::refresher::CycleOutcome;
use fusion_dashboard::surface::{PageRegions, PageSurface};
use fusion_dashboard::timer::RefreshTimer;
use fusion_dashboard::DashboardError;

/// What a scripted endpoint answers with
#[derive(Debug, Clone)]
pub enum Canned {
    Response(u16, String),
    Unreachable,
}

impl Default for Canned {
    fn default() -> Self {
        Canned::Response(200, "{}".to_string())
    }
}

/// An HTTP client with one scripted answer per endpoint that counts requests
#[derive(Debug, Default)]
pub struct ScriptedClient {
    pub stats: Mutex<Canned>,
    pub alerts: Mutex<Canned>,
    pub requests: AtomicUsize,
}

impl ScriptedClient {
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl HttpClient for ScriptedClient {
    async fn get(&self, url: &str) -> fusion_dashboard::Result<HttpResponse> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let canned = if url.contains("/alerts") {
            self.alerts.lock().unwrap().clone()
        } else {
            self.stats.lock().unwrap().clone()
        };
        match canned {
            Canned::Response(status, body) => Ok(HttpResponse { status, body }),
            Canned::Unreachable => Err(DashboardError::Fetch(format!(
                "GET {} failed: connection refused",
                url
            ))),
        }
    }
}

#[derive(Debug, Default, World)]
pub struct DashboardWorld {
    pub client: Arc<ScriptedClient>,
    pub surface: PageSurface,

    // Poll cycle results
    pub outcome: Option<CycleOutcome>,
    pub previous_page: Option<PageRegions>,

    // Lifecycle
    pub timer: Option<RefreshTimer>,
    pub requests_at_teardown: Option<usize>,

    // Page server
    pub page_body: Option<String>,
}

impl DashboardWorld {
    /// A refresher wired to the scripted client and this world's surface,
    /// showing times in UTC
    pub fn refresher(
        &self,
    ) -> fusion_dashboard::refresher::DashboardRefresher<chrono::Utc> {
        fusion_dashboard::refresher::DashboardRefresher::new(
            &fusion_dashboard::config::ApiConfig::default(),
            self.client.clone(),
            Arc::new(self.surface.clone()),
        )
        .with_time_zone(chrono::Utc)
    }
}
