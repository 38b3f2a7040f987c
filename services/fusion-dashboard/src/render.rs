//! HTML fragments for the statistics panel and the alerts list
//!
//! Every function here is pure: it takes a decoded API response and returns
//! the markup for one page region. Timestamps are shown in the given time
//! zone using Spanish (es-ES) numeric formats.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::model::{AlertRecord, Detection, StatsSnapshot, NOT_AVAILABLE};

/// Shown in the class statistics panel when no class has been counted
pub const NO_DATA_PLACEHOLDER: &str = r#"<div class="loading">No hay datos</div>"#;

/// Shown in the alerts container when the feed is empty
pub const NO_ALERTS_PLACEHOLDER: &str = r#"<div class="loading">No hay alertas registradas</div>"#;

/// Replaces the alerts container when the alerts request fails
pub const ALERTS_ERROR_PANEL: &str = r#"<div class="error">Error conectando con el servidor. Verifique que el servicio Fusion esté ejecutándose.</div>"#;

/// Label rendered for a timestamp that cannot be parsed
pub const INVALID_DATE: &str = "Invalid Date";

/// Parse an alert timestamp.
///
/// Accepts RFC 3339 (with offset), a naive ISO-8601 date-time (interpreted in
/// `tz`), or a bare date (interpreted as UTC midnight).
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }
    let naive = raw
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"));
    if let Ok(naive) = naive {
        return tz.from_local_datetime(&naive).earliest();
    }
    let midnight = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(tz))
}

/// Time of day, e.g. `9:05:03`
pub fn format_time_of_day<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match parse_timestamp(raw, tz) {
        Some(dt) => dt.format("%-H:%M:%S").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Full date and time, e.g. `1/1/2024, 10:00:00`
pub fn format_date_time<Tz>(raw: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match raw.and_then(|raw| parse_timestamp(raw, tz)) {
        Some(dt) => dt.format("%-d/%-m/%Y, %-H:%M:%S").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Text for the last-alert label: the time of day, or `N/A`
pub fn render_last_alert<Tz>(stats: &StatsSnapshot, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match stats.last_alert() {
        Some(raw) => format_time_of_day(raw, tz),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Class statistics panel: one tile per class, or a placeholder
pub fn render_class_stats(stats: &StatsSnapshot) -> String {
    let counts = stats.class_counts();
    if counts.is_empty() {
        return NO_DATA_PLACEHOLDER.to_string();
    }

    let tiles: String = counts
        .iter()
        .map(|(class_name, count)| {
            format!(
                r#"<div class="stat-item"><div class="stat-value">{}</div><div class="stat-label">{}</div></div>"#,
                count,
                html_escape(class_name)
            )
        })
        .collect();

    format!(r#"<div class="stats-grid">{}</div>"#, tiles)
}

/// Count detections per class, in the order each class first appears
pub fn group_detections(detections: &[Detection]) -> Vec<(String, usize)> {
    let mut groups: Vec<(String, usize)> = Vec::new();
    for detection in detections {
        let class_name = detection.class_name();
        match groups.iter_mut().find(|(name, _)| name == class_name) {
            Some((_, count)) => *count += 1,
            None => groups.push((class_name.to_string(), 1)),
        }
    }
    groups
}

/// A single alert block with its header and one badge per class
pub fn render_alert<Tz>(alert: &AlertRecord, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let badges: String = group_detections(alert.detections())
        .iter()
        .map(|(class_name, count)| {
            format!(
                r#"<span class="detection-badge">{}: {}</span>"#,
                html_escape(class_name),
                count
            )
        })
        .collect();

    format!(
        r#"<div class="alert-item"><div class="alert-header"><strong>Alerta #{}</strong><span class="alert-time">{}</span></div><div class="alert-detections">{}</div></div>"#,
        alert.count_label(),
        html_escape(&format_date_time(alert.timestamp.as_deref(), tz)),
        badges
    )
}

/// Alerts list, newest first, or a placeholder when there are none.
///
/// `alerts` is in server order (oldest first).
pub fn render_alerts<Tz>(alerts: &[AlertRecord], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if alerts.is_empty() {
        return NO_ALERTS_PLACEHOLDER.to_string();
    }
    alerts.iter().rev().map(|alert| render_alert(alert, tz)).collect()
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
