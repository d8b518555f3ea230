// Chart catalog domain model - chart keys, families and display metadata
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Visual layout a chart is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartFamily {
    Bar,
    Bubble,
    Pie,
}

impl ChartFamily {
    pub const ALL: [ChartFamily; 3] = [ChartFamily::Bar, ChartFamily::Bubble, ChartFamily::Pie];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartFamily::Bar => "bar_chart",
            ChartFamily::Bubble => "bubble_chart",
            ChartFamily::Pie => "pie_chart",
        }
    }
}

impl fmt::Display for ChartFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every chart the dispatcher can produce, plus the index placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChartKey {
    Instruction,
    Ops,
    SlowOps,
    SlowOpsCounts,
    ConnectionsAccepted,
    ConnectionsTime,
    ConnectionsTotal,
    Reslen,
}

impl ChartKey {
    /// Keys reachable from chart dispatch.
    pub const DISPATCHABLE: [ChartKey; 7] = [
        ChartKey::Ops,
        ChartKey::SlowOps,
        ChartKey::SlowOpsCounts,
        ChartKey::ConnectionsAccepted,
        ChartKey::ConnectionsTime,
        ChartKey::ConnectionsTotal,
        ChartKey::Reslen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKey::Instruction => "instruction",
            ChartKey::Ops => "ops",
            ChartKey::SlowOps => "slowops",
            ChartKey::SlowOpsCounts => "slowops-counts",
            ChartKey::ConnectionsAccepted => "connections-accepted",
            ChartKey::ConnectionsTime => "connections-time",
            ChartKey::ConnectionsTotal => "connections-total",
            ChartKey::Reslen => "reslen",
        }
    }
}

impl fmt::Display for ChartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartDescriptor {
    pub index: usize,
    pub title: String,
    pub description: String,
    pub route: String,
}

impl ChartDescriptor {
    pub fn new(index: usize, title: &str, description: &str, route: &str) -> Self {
        Self {
            index,
            title: title.to_string(),
            description: description.to_string(),
            route: route.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("chart catalog has no descriptor for chart type {0}")]
    MissingDescriptor(ChartKey),
}

/// Immutable chart registry, built once at startup.
#[derive(Debug, Clone)]
pub struct ChartCatalog {
    entries: HashMap<ChartKey, ChartDescriptor>,
}

impl ChartCatalog {
    pub fn from_entries(entries: impl IntoIterator<Item = (ChartKey, ChartDescriptor)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// The standard dashboard catalog, validated.
    pub fn standard() -> Result<Self, CatalogError> {
        let catalog = Self::from_entries([
            (ChartKey::Instruction, ChartDescriptor::new(0, "select a chart", "", "")),
            (
                ChartKey::Ops,
                ChartDescriptor::new(
                    1,
                    "Average Operation Time",
                    "A chart displaying average operations time over a period of time",
                    "/ops?type=stats",
                ),
            ),
            (
                ChartKey::SlowOps,
                ChartDescriptor::new(
                    2,
                    "Slow Operation Counts",
                    "A chart displaying total counts and duration of operations",
                    "/slowops?type=stats",
                ),
            ),
            (
                ChartKey::SlowOpsCounts,
                ChartDescriptor::new(
                    3,
                    "Operation Counts",
                    "A chart displaying total counts of operations",
                    "/slowops?type=counts",
                ),
            ),
            (
                ChartKey::ConnectionsAccepted,
                ChartDescriptor::new(
                    4,
                    "Accepted Connections",
                    "A chart displaying accepted connections from clients",
                    "/connections?type=accepted",
                ),
            ),
            (
                ChartKey::ConnectionsTime,
                ChartDescriptor::new(
                    5,
                    "Accepted & Ended Connections",
                    "A chart displaying accepted vs ended connections over a period of time",
                    "/connections?type=time",
                ),
            ),
            (
                ChartKey::ConnectionsTotal,
                ChartDescriptor::new(
                    6,
                    "Accepted & Ended from IPs",
                    "A chart displaying accepted vs ended connections by client IPs",
                    "/connections?type=total",
                ),
            ),
            (
                ChartKey::Reslen,
                ChartDescriptor::new(
                    7,
                    "Response Length in MB",
                    "A chart displaying total response length from client IPs",
                    "/reslen?type=ips",
                ),
            ),
        ]);
        catalog.validate()?;
        Ok(catalog)
    }

    /// Every dispatchable key must have a descriptor.
    pub fn validate(&self) -> Result<(), CatalogError> {
        match ChartKey::DISPATCHABLE
            .iter()
            .find(|key| !self.entries.contains_key(*key))
        {
            Some(key) => Err(CatalogError::MissingDescriptor(*key)),
            None => Ok(()),
        }
    }

    pub fn get(&self, key: ChartKey) -> Option<&ChartDescriptor> {
        self.entries.get(&key)
    }

    /// Entries in display order.
    pub fn ordered(&self) -> Vec<(ChartKey, &ChartDescriptor)> {
        let mut entries: Vec<_> = self.entries.iter().map(|(k, d)| (*k, d)).collect();
        entries.sort_by_key(|(_, d)| d.index);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_covers_dispatchable_keys() {
        let catalog = ChartCatalog::standard().unwrap();
        for key in ChartKey::DISPATCHABLE {
            assert!(catalog.get(key).is_some(), "missing {key}");
        }
        assert_eq!(catalog.get(ChartKey::ConnectionsTotal).unwrap().index, 6);
        assert_eq!(catalog.get(ChartKey::Reslen).unwrap().route, "/reslen?type=ips");
    }

    #[test]
    fn test_validate_reports_missing_key() {
        let catalog = ChartCatalog::from_entries([(
            ChartKey::Ops,
            ChartDescriptor::new(1, "Average Operation Time", "", "/ops?type=stats"),
        )]);
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::MissingDescriptor(ChartKey::SlowOps))
        );
    }

    #[test]
    fn test_ordered_by_index() {
        let catalog = ChartCatalog::standard().unwrap();
        let keys: Vec<&str> = catalog.ordered().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "instruction",
                "ops",
                "slowops",
                "slowops-counts",
                "connections-accepted",
                "connections-time",
                "connections-total",
                "reslen"
            ]
        );
    }
}
