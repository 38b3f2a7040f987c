//! BDD step definitions for the alerts list

use cucumber::{given, then};

use fusion_dashboard::render::{ALERTS_ERROR_PANEL, NO_ALERTS_PLACEHOLDER};

use crate::world::{Canned, DashboardWorld};

const ALERT_BLOCK: &str = r#"<div class="alert-item">"#;

/// The markup of the block whose header reads `Alerta #{label}`
fn alert_block(html: &str, label: &str) -> String {
    let header = format!("Alerta #{}<", label);
    html.split(ALERT_BLOCK)
        .find(|block| block.contains(&header))
        .unwrap_or_else(|| panic!("no alert {} in:\n{}", label, html))
        .to_string()
}

#[given(expr = "the alerts endpoint returns {string}")]
fn alerts_returns(world: &mut DashboardWorld, body: String) {
    *world.client.alerts.lock().unwrap() = Canned::Response(200, body);
}

#[given(expr = "the alerts endpoint returns HTTP status {int}")]
fn alerts_returns_status(world: &mut DashboardWorld, status: u16) {
    *world.client.alerts.lock().unwrap() = Canned::Response(status, String::new());
}

#[given("the alerts endpoint is unreachable")]
fn alerts_unreachable(world: &mut DashboardWorld) {
    *world.client.alerts.lock().unwrap() = Canned::Unreachable;
}

#[then(expr = "the alerts list shows {int} alerts")]
async fn alerts_count(world: &mut DashboardWorld, expected: usize) {
    let page = world.surface.snapshot().await;
    assert_eq!(page.alerts_container.matches(ALERT_BLOCK).count(), expected);
}

#[then(expr = "alert {string} appears before alert {string}")]
async fn alert_order(world: &mut DashboardWorld, first: String, second: String) {
    let html = world.surface.snapshot().await.alerts_container;
    let first_pos = html
        .find(&format!("Alerta #{}<", first))
        .expect("first alert missing");
    let second_pos = html
        .find(&format!("Alerta #{}<", second))
        .expect("second alert missing");
    assert!(first_pos < second_pos, "{}", html);
}

#[then(expr = "alert {string} has no badges")]
async fn alert_has_no_badges(world: &mut DashboardWorld, label: String) {
    let html = world.surface.snapshot().await.alerts_container;
    assert!(!alert_block(&html, &label).contains("detection-badge"));
}

#[then(expr = "alert {string} has badge {string}")]
async fn alert_has_badge(world: &mut DashboardWorld, label: String, badge: String) {
    let html = world.surface.snapshot().await.alerts_container;
    let expected = format!(r#"<span class="detection-badge">{}</span>"#, badge);
    assert!(alert_block(&html, &label).contains(&expected), "{}", html);
}

#[then(expr = "alert {string} is dated {string}")]
async fn alert_dated(world: &mut DashboardWorld, label: String, date: String) {
    let html = world.surface.snapshot().await.alerts_container;
    let expected = format!(r#"<span class="alert-time">{}</span>"#, date);
    assert!(alert_block(&html, &label).contains(&expected), "{}", html);
}

#[then("the alerts list shows the no-alerts placeholder")]
async fn alerts_placeholder(world: &mut DashboardWorld) {
    assert_eq!(
        world.surface.snapshot().await.alerts_container,
        NO_ALERTS_PLACEHOLDER
    );
}

#[then("the alerts list shows the connection error")]
async fn alerts_error(world: &mut DashboardWorld) {
    let html = world.surface.snapshot().await.alerts_container;
    assert_eq!(html, ALERTS_ERROR_PANEL);
    assert!(html.contains("Verifique que el servicio Fusion esté ejecutándose"));
}
