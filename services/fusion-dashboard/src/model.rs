//! Response shapes of the Fusion API and the connectivity indicator state

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Label substituted for an absent alert number or alert time
pub const NOT_AVAILABLE: &str = "N/A";

/// Class name used when a detection carries none
pub const UNKNOWN_CLASS: &str = "unknown";

/// Aggregate statistics as returned by `GET /stats`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub total_alerts: Option<u64>,
    #[serde(default)]
    pub last_alert: Option<String>,
    #[serde(default)]
    pub class_counts: Option<ClassCounts>,
}

impl StatsSnapshot {
    pub fn total_alerts(&self) -> u64 {
        self.total_alerts.unwrap_or(0)
    }

    /// The last alert timestamp, treating an empty string as absent
    pub fn last_alert(&self) -> Option<&str> {
        self.last_alert.as_deref().filter(|s| !s.is_empty())
    }

    pub fn class_counts(&self) -> &[(String, u64)] {
        self.class_counts
            .as_ref()
            .map(ClassCounts::as_slice)
            .unwrap_or(&[])
    }
}

/// Per-class detection totals in the order the server listed them.
///
/// A JSON object is read entry by entry so the server's key order survives
/// deserialization. A repeated key keeps its first position and takes the
/// last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassCounts(Vec<(String, u64)>);

impl ClassCounts {
    pub fn as_slice(&self) -> &[(String, u64)] {
        &self.0
    }

    fn insert(&mut self, class_name: String, count: u64) {
        match self.0.iter_mut().find(|(name, _)| *name == class_name) {
            Some(entry) => entry.1 = count,
            None => self.0.push((class_name, count)),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for ClassCounts {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut counts = ClassCounts::default();
        for (name, count) in iter {
            counts.insert(name.into(), count);
        }
        counts
    }
}

impl<'de> Deserialize<'de> for ClassCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ClassCountsVisitor;

        impl<'de> Visitor<'de> for ClassCountsVisitor {
            type Value = ClassCounts;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping class names to counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut counts = ClassCounts(Vec::with_capacity(map.size_hint().unwrap_or(0)));
                while let Some((name, count)) = map.next_entry::<String, u64>()? {
                    counts.insert(name, count);
                }
                Ok(counts)
            }
        }

        deserializer.deserialize_map(ClassCountsVisitor)
    }
}

/// A single object detection attached to an alert
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Detection {
    #[serde(default)]
    pub class_name: Option<String>,
}

impl Detection {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: Some(class_name.into()),
        }
    }

    /// The class name, or `"unknown"` when absent or empty
    pub fn class_name(&self) -> &str {
        self.class_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_CLASS)
    }
}

/// One logged alert as returned inside `GET /alerts`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AlertRecord {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub detections: Option<Vec<Detection>>,
}

impl AlertRecord {
    /// Header label for the alert number; a zero count is shown as `N/A`
    /// just like an absent one.
    pub fn count_label(&self) -> String {
        match self.count {
            Some(count) if count > 0 => count.to_string(),
            _ => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn detections(&self) -> &[Detection] {
        self.detections.as_deref().unwrap_or(&[])
    }
}

/// Body of `GET /alerts`, oldest alert first
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AlertFeed {
    #[serde(default)]
    pub alerts: Option<Vec<AlertRecord>>,
}

impl AlertFeed {
    pub fn alerts(&self) -> &[AlertRecord] {
        self.alerts.as_deref().unwrap_or(&[])
    }
}

/// Reachability of the Fusion service as last observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityState {
    Connected,
    Disconnected,
}

impl ConnectivityState {
    /// Text shown inside the status element
    pub fn label(&self) -> &'static str {
        match self {
            ConnectivityState::Connected => "Conectado",
            ConnectivityState::Disconnected => "Desconectado",
        }
    }

    /// CSS class list applied to the status element
    pub fn css_class(&self) -> &'static str {
        match self {
            ConnectivityState::Connected => "status active",
            ConnectivityState::Disconnected => "status inactive",
        }
    }
}

impl fmt::Display for ConnectivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectivityState::Connected => write!(f, "Connected"),
            ConnectivityState::Disconnected => write!(f, "Disconnected"),
        }
    }
}
