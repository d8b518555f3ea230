// Chart dispatch - maps an (attribute, subtype) request onto a render plan
use super::chart::{ChartFamily, ChartKey};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("unknown chart attribute '{0}'")]
    UnknownAttribute(String),
    #[error("unknown {attribute} chart type '{subtype}'")]
    UnknownSubtype { attribute: String, subtype: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartAttribute {
    Ops,
    SlowOps,
    Connections,
    Reslen,
}

impl ChartAttribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartAttribute::Ops => "ops",
            ChartAttribute::SlowOps => "slowops",
            ChartAttribute::Connections => "connections",
            ChartAttribute::Reslen => "reslen",
        }
    }
}

impl FromStr for ChartAttribute {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ops" => Ok(ChartAttribute::Ops),
            "slowops" => Ok(ChartAttribute::SlowOps),
            "connections" => Ok(ChartAttribute::Connections),
            "reslen" => Ok(ChartAttribute::Reslen),
            other => Err(DispatchError::UnknownAttribute(other.to_string())),
        }
    }
}

/// Connection breakdown passed through to the connection-stats query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStat {
    Time,
    Total,
}

impl ConnectionStat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStat::Time => "time",
            ConnectionStat::Total => "total",
        }
    }
}

/// Shape of the series an aggregate query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    OpTimes,
    SlowOpCounts,
    NameValues,
    RemoteStats,
}

/// A fully resolved chart request. Subtypes are closed per attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSelection {
    Ops,
    SlowOpsStats,
    SlowOpsCounts,
    ConnectionsAccepted,
    Connections(ConnectionStat),
    Reslen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderPlan {
    pub chart_key: ChartKey,
    pub family: ChartFamily,
    pub series_kind: SeriesKind,
    pub v_axis_label: Option<&'static str>,
}

impl ChartSelection {
    pub fn parse(attribute: &str, subtype: &str) -> Result<Self, DispatchError> {
        let attr: ChartAttribute = attribute.parse()?;
        let unknown = || DispatchError::UnknownSubtype {
            attribute: attr.as_str().to_string(),
            subtype: subtype.to_string(),
        };

        match attr {
            ChartAttribute::Ops => Ok(ChartSelection::Ops),
            ChartAttribute::SlowOps => match subtype {
                "" | "stats" => Ok(ChartSelection::SlowOpsStats),
                "counts" => Ok(ChartSelection::SlowOpsCounts),
                _ => Err(unknown()),
            },
            ChartAttribute::Connections => match subtype {
                "" | "accepted" => Ok(ChartSelection::ConnectionsAccepted),
                "time" => Ok(ChartSelection::Connections(ConnectionStat::Time)),
                "total" => Ok(ChartSelection::Connections(ConnectionStat::Total)),
                _ => Err(unknown()),
            },
            ChartAttribute::Reslen => Ok(ChartSelection::Reslen),
        }
    }

    pub fn plan(&self) -> RenderPlan {
        let (chart_key, family, series_kind, v_axis_label) = match self {
            ChartSelection::Ops => (
                ChartKey::Ops,
                ChartFamily::Bubble,
                SeriesKind::OpTimes,
                Some("seconds"),
            ),
            ChartSelection::SlowOpsStats => (
                ChartKey::SlowOps,
                ChartFamily::Bubble,
                SeriesKind::SlowOpCounts,
                Some("count"),
            ),
            ChartSelection::SlowOpsCounts => (
                ChartKey::SlowOpsCounts,
                ChartFamily::Pie,
                SeriesKind::NameValues,
                None,
            ),
            ChartSelection::ConnectionsAccepted => (
                ChartKey::ConnectionsAccepted,
                ChartFamily::Pie,
                SeriesKind::NameValues,
                None,
            ),
            ChartSelection::Connections(ConnectionStat::Time) => (
                ChartKey::ConnectionsTime,
                ChartFamily::Bar,
                SeriesKind::RemoteStats,
                None,
            ),
            ChartSelection::Connections(ConnectionStat::Total) => (
                ChartKey::ConnectionsTotal,
                ChartFamily::Bar,
                SeriesKind::RemoteStats,
                None,
            ),
            ChartSelection::Reslen => (
                ChartKey::Reslen,
                ChartFamily::Pie,
                SeriesKind::NameValues,
                None,
            ),
        };
        RenderPlan {
            chart_key,
            family,
            series_kind,
            v_axis_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatch(attribute: &str, subtype: &str) -> Result<RenderPlan, DispatchError> {
        ChartSelection::parse(attribute, subtype).map(|selection| selection.plan())
    }

    #[test]
    fn test_dispatch_table() {
        let cases = [
            ("ops", "", "ops", ChartFamily::Bubble, Some("seconds")),
            ("ops", "anything", "ops", ChartFamily::Bubble, Some("seconds")),
            ("slowops", "", "slowops", ChartFamily::Bubble, Some("count")),
            ("slowops", "stats", "slowops", ChartFamily::Bubble, Some("count")),
            ("slowops", "counts", "slowops-counts", ChartFamily::Pie, None),
            ("connections", "", "connections-accepted", ChartFamily::Pie, None),
            ("connections", "accepted", "connections-accepted", ChartFamily::Pie, None),
            ("connections", "time", "connections-time", ChartFamily::Bar, None),
            ("connections", "total", "connections-total", ChartFamily::Bar, None),
            ("reslen", "", "reslen", ChartFamily::Pie, None),
            ("reslen", "ips", "reslen", ChartFamily::Pie, None),
        ];

        for (attr, subtype, key, family, label) in cases {
            let plan = dispatch(attr, subtype).unwrap();
            assert_eq!(plan.chart_key.as_str(), key, "{attr}/{subtype}");
            assert_eq!(plan.family, family, "{attr}/{subtype}");
            assert_eq!(plan.v_axis_label, label, "{attr}/{subtype}");
        }
    }

    #[test]
    fn test_series_kinds() {
        assert_eq!(dispatch("ops", "").unwrap().series_kind, SeriesKind::OpTimes);
        assert_eq!(dispatch("slowops", "stats").unwrap().series_kind, SeriesKind::SlowOpCounts);
        assert_eq!(dispatch("slowops", "counts").unwrap().series_kind, SeriesKind::NameValues);
        assert_eq!(dispatch("connections", "time").unwrap().series_kind, SeriesKind::RemoteStats);
    }

    #[test]
    fn test_connection_subtype_passed_through() {
        let selection = ChartSelection::parse("connections", "total").unwrap();
        assert_eq!(selection, ChartSelection::Connections(ConnectionStat::Total));
        assert_eq!(ConnectionStat::Total.as_str(), "total");
    }

    #[test]
    fn test_unknown_combinations_rejected() {
        assert_eq!(
            dispatch("queries", ""),
            Err(DispatchError::UnknownAttribute("queries".to_string()))
        );
        assert_eq!(
            dispatch("connections", "bogus"),
            Err(DispatchError::UnknownSubtype {
                attribute: "connections".to_string(),
                subtype: "bogus".to_string()
            })
        );
        assert!(dispatch("slowops", "ips").is_err());
    }
}
