//! Page server: serves the dashboard page and the current region contents

use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;

use crate::surface::PageSurface;

/// Page server application state
#[derive(Clone)]
pub struct DashboardState {
    pub surface: PageSurface,
    pub refresh_interval_ms: u64,
}

/// Build the page server router
pub fn build_router(surface: PageSurface, refresh_interval_ms: u64) -> Router {
    let dashboard_state = DashboardState {
        surface,
        refresh_interval_ms,
    };

    Router::new()
        .route("/", get(index_handler))
        .route("/api/regions", get(regions_handler))
        .route("/health", get(health_handler))
        .with_state(dashboard_state)
}

async fn index_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    let regions = dashboard.surface.snapshot().await;

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Fusion - Panel de Alertas</title>
    <style>
        body {{ font-family: system-ui, sans-serif; max-width: 960px; margin: 0 auto; padding: 1rem; background: #f5f6f8; }}
        .card {{ background: #fff; border-radius: 0.5rem; padding: 1rem; margin-bottom: 1rem; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }}
        .status {{ display: inline-block; padding: 0.25em 0.6em; border-radius: 0.25rem; font-weight: 600; color: #383d41; background-color: #e2e3e5; }}
        .status.active {{ color: #155724; background-color: #d4edda; }}
        .status.inactive {{ color: #721c24; background-color: #f8d7da; }}
        .stats-grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(120px, 1fr)); gap: 0.5rem; }}
        .stat-item {{ text-align: center; padding: 0.5rem; border: 1px solid #dee2e6; border-radius: 0.25rem; }}
        .stat-value {{ font-size: 1.5em; font-weight: 700; }}
        .alert-item {{ border-bottom: 1px solid #dee2e6; padding: 0.5rem 0; }}
        .alert-header {{ display: flex; justify-content: space-between; }}
        .alert-time {{ color: #6c757d; }}
        .detection-badge {{ display: inline-block; margin: 0.25rem 0.25rem 0 0; padding: 0.15em 0.5em; border-radius: 0.25rem; background: #cce5ff; color: #004085; font-size: 0.85em; }}
        .loading {{ color: #6c757d; }}
        .error {{ color: #721c24; background: #f8d7da; padding: 0.5rem; border-radius: 0.25rem; }}
    </style>
    <script>
        function refreshRegions() {{
            fetch('/api/regions')
                .then(r => r.json())
                .then(data => {{
                    document.getElementById('total-alerts').innerHTML = data.total_alerts;
                    document.getElementById('last-alert').innerHTML = data.last_alert;
                    document.getElementById('class-stats').innerHTML = data.class_stats;
                    document.getElementById('alerts-container').innerHTML = data.alerts_container;
                    const status = document.getElementById('status');
                    status.textContent = data.status_text;
                    status.className = data.status_class;
                }})
                .catch(err => console.error('Failed to refresh regions:', err));
        }}
        const refreshInterval = setInterval(refreshRegions, {refresh_interval_ms});
        window.addEventListener('beforeunload', () => clearInterval(refreshInterval));
    </script>
</head>
<body>
    <h1>Fusion - Panel de Alertas <span id="status" class="{status_class}">{status_text}</span></h1>
    <section class="card">
        <h2>Total de alertas: <span id="total-alerts">{total_alerts}</span></h2>
        <p>Última alerta: <span id="last-alert">{last_alert}</span></p>
    </section>
    <section class="card">
        <h2>Detecciones por clase</h2>
        <div id="class-stats">{class_stats}</div>
    </section>
    <section class="card">
        <h2>Alertas recientes</h2>
        <div id="alerts-container">{alerts_container}</div>
    </section>
</body>
</html>"#,
        refresh_interval_ms = dashboard.refresh_interval_ms,
        status_class = regions.status_class,
        status_text = regions.status_text,
        total_alerts = regions.total_alerts,
        last_alert = regions.last_alert,
        class_stats = regions.class_stats,
        alerts_container = regions.alerts_container,
    );

    Html(html)
}

async fn regions_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    axum::Json(dashboard.surface.snapshot().await)
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}
