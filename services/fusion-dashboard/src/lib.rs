//! Fusion Dashboard - alert statistics page for the Fusion detection service
//!
//! Polls the Fusion API for aggregate statistics and recent alerts, renders
//! them into page regions, and serves the page to browsers.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod io;
pub mod model;
pub mod refresher;
pub mod render;
pub mod surface;
pub mod timer;

pub use config::{load_config, Config};
pub use error::{DashboardError, Result};

use std::net::SocketAddr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::io::ReqwestHttpClient;
use crate::refresher::DashboardRefresher;
use crate::surface::PageSurface;
use crate::timer::RefreshTimer;

/// Run the dashboard with the given configuration until Ctrl-C
pub async fn run(config: Config) -> Result<()> {
    config.validate()?;

    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::default());
    let surface = PageSurface::new();
    let cancel = CancellationToken::new();

    let refresher = Arc::new(DashboardRefresher::new(
        &config.api,
        http,
        Arc::new(surface.clone()),
    ));

    let server = if config.server.enabled {
        let port = config.server.port;
        let router = dashboard::build_router(surface.clone(), config.refresh.interval_ms);
        let cancel_for_server = cancel.clone();

        Some(tokio::spawn(async move {
            let addr = SocketAddr::from(([0, 0, 0, 0], port));
            let listener = match tokio::net::TcpListener::bind(addr).await {
                Ok(l) => l,
                Err(e) => {
                    tracing::error!(
                        "Failed to bind page server to port {}: {}. Continuing without it.",
                        port,
                        e
                    );
                    return;
                }
            };
            tracing::info!("Dashboard listening on http://{}", addr);

            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    cancel_for_server.cancelled().await;
                })
                .await
            {
                tracing::error!("{}", DashboardError::Server(e.to_string()));
            }

            tracing::debug!("Page server stopped");
        }))
    } else {
        tracing::info!("Page server disabled");
        None
    };

    let mut timer = RefreshTimer::start(refresher, config.refresh.interval());
    tracing::info!("Fusion dashboard started");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    timer.stop().await;
    cancel.cancel();
    if let Some(server) = server {
        join_page_server(server).await;
    }

    tracing::info!("Fusion dashboard stopped");
    Ok(())
}

/// Wait for the page server task, returning false if it panicked or was aborted
async fn join_page_server(server: tokio::task::JoinHandle<()>) -> bool {
    match server.await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Page server task ended abnormally: {}", e);
            false
        }
    }
}
