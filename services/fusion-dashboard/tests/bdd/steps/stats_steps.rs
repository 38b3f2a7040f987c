//! BDD step definitions for the statistics panel and the shared poll cycle

use cucumber::{given, then, when};

use fusion_dashboard::render::NO_DATA_PLACEHOLDER;

use crate::world::{Canned, DashboardWorld};

#[given(expr = "the stats endpoint returns {string}")]
fn stats_returns(world: &mut DashboardWorld, body: String) {
    *world.client.stats.lock().unwrap() = Canned::Response(200, body);
}

#[given(expr = "the stats endpoint returns HTTP status {int}")]
fn stats_returns_status(world: &mut DashboardWorld, status: u16) {
    *world.client.stats.lock().unwrap() = Canned::Response(status, "Internal Server Error".into());
}

#[given("the stats endpoint is unreachable")]
fn stats_unreachable(world: &mut DashboardWorld) {
    *world.client.stats.lock().unwrap() = Canned::Unreachable;
}

#[given("the dashboard has already been refreshed")]
async fn already_refreshed(world: &mut DashboardWorld) {
    world.refresher().refresh_once().await;
    world.previous_page = Some(world.surface.snapshot().await);
}

#[when("the dashboard refreshes once")]
async fn refresh_once(world: &mut DashboardWorld) {
    world.outcome = Some(world.refresher().refresh_once().await);
}

#[then(expr = "the counter shows {string}")]
async fn counter_shows(world: &mut DashboardWorld, expected: String) {
    assert_eq!(world.surface.snapshot().await.total_alerts, expected);
}

#[then(expr = "the last alert label shows {string}")]
async fn last_alert_shows(world: &mut DashboardWorld, expected: String) {
    assert_eq!(world.surface.snapshot().await.last_alert, expected);
}

#[then(expr = "the class panel shows {int} tiles")]
async fn class_panel_tiles(world: &mut DashboardWorld, expected: usize) {
    let page = world.surface.snapshot().await;
    assert_eq!(
        page.class_stats.matches(r#"class="stat-item""#).count(),
        expected,
        "class panel:\n{}",
        page.class_stats
    );
}

#[then(expr = "the class panel shows {int} {string}")]
async fn class_panel_tile(world: &mut DashboardWorld, count: u64, class_name: String) {
    let page = world.surface.snapshot().await;
    let tile = format!(
        r#"<div class="stat-value">{}</div><div class="stat-label">{}</div>"#,
        count, class_name
    );
    assert!(
        page.class_stats.contains(&tile),
        "Expected tile {}/{} in:\n{}",
        count,
        class_name,
        page.class_stats
    );
}

#[then("the class panel shows the no-data placeholder")]
async fn class_panel_placeholder(world: &mut DashboardWorld) {
    assert_eq!(world.surface.snapshot().await.class_stats, NO_DATA_PLACEHOLDER);
}

#[then("the statistics are unchanged")]
async fn statistics_unchanged(world: &mut DashboardWorld) {
    let before = world.previous_page.as_ref().expect("no previous render");
    let after = world.surface.snapshot().await;
    assert_eq!(after.total_alerts, before.total_alerts);
    assert_eq!(after.last_alert, before.last_alert);
    assert_eq!(after.class_stats, before.class_stats);
}

#[then(expr = "the indicator shows {string}")]
async fn indicator_shows(world: &mut DashboardWorld, expected: String) {
    assert_eq!(world.surface.snapshot().await.status_text, expected);
}

#[then(expr = "the indicator is styled {string}")]
async fn indicator_styled(world: &mut DashboardWorld, expected: String) {
    assert_eq!(world.surface.snapshot().await.status_class, expected);
}
