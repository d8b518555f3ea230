// Hatchet domain models - dataset info and aggregate series rows
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const SPAN_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// One ingested log dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HatchetInfo {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub arch: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

impl HatchetInfo {
    pub fn summary(&self) -> String {
        let mut summary = format!("{}: {} to {}", self.name, self.start, self.end);
        if let Some(span) = self.span() {
            summary.push_str(&format!(" ({span})"));
        }
        if !self.version.is_empty() {
            summary.push_str(&format!(", MongoDB v{}", self.version));
        }
        summary
    }

    fn span(&self) -> Option<String> {
        let start = parse_minute(&self.start)?;
        let end = parse_minute(&self.end)?;
        let minutes = (end - start).num_minutes();
        if minutes < 0 {
            return None;
        }
        Some(format!("{}h {}m", minutes / 60, minutes % 60))
    }
}

fn parse_minute(timestamp: &str) -> Option<NaiveDateTime> {
    let prefix = timestamp.get(..16)?;
    NaiveDateTime::parse_from_str(prefix, SPAN_FORMAT).ok()
}

/// Time-stamped operation aggregate, used by the ops and slowops bubble charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpCount {
    pub date: String,
    pub op: String,
    #[serde(default)]
    pub ns: String,
    #[serde(default)]
    pub filter: String,
    pub count: u64,
    /// Average duration in milliseconds.
    #[serde(default)]
    pub milli: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameValue {
    pub name: String,
    pub value: f64,
}

/// Accepted/ended connections, keyed by a client IP or a time bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteStat {
    pub value: String,
    pub accepted: u64,
    pub ended: u64,
}

/// Series returned by an aggregate query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum SeriesData {
    OpCounts(Vec<OpCount>),
    NameValues(Vec<NameValue>),
    Remotes(Vec<RemoteStat>),
}

impl SeriesData {
    /// First and last timestamps of a time-stamped series with rows.
    pub fn bounds(&self) -> Option<(&str, &str)> {
        match self {
            SeriesData::OpCounts(rows) => match (rows.first(), rows.last()) {
                (Some(first), Some(last)) => Some((first.date.as_str(), last.date.as_str())),
                _ => None,
            },
            SeriesData::NameValues(_) | SeriesData::Remotes(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SeriesData::OpCounts(rows) => rows.len(),
            SeriesData::NameValues(rows) => rows.len(),
            SeriesData::Remotes(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(date: &str) -> OpCount {
        OpCount {
            date: date.to_string(),
            op: "find".to_string(),
            ns: "db.users".to_string(),
            filter: "{_id: 1}".to_string(),
            count: 3,
            milli: 120.0,
        }
    }

    #[test]
    fn test_summary() {
        let info = HatchetInfo {
            name: "mongod_log".to_string(),
            version: "6.0.4".to_string(),
            start: "2023-01-01T00:00:00.000Z".to_string(),
            end: "2023-01-01T02:30:10.000Z".to_string(),
            ..Default::default()
        };
        assert_eq!(
            info.summary(),
            "mongod_log: 2023-01-01T00:00:00.000Z to 2023-01-01T02:30:10.000Z (2h 30m), MongoDB v6.0.4"
        );
    }

    #[test]
    fn test_summary_without_parsable_span() {
        let info = HatchetInfo {
            name: "empty".to_string(),
            ..Default::default()
        };
        assert_eq!(info.summary(), "empty:  to ");
    }

    #[test]
    fn test_bounds_only_for_time_series() {
        let series = SeriesData::OpCounts(vec![op("2023-01-01T01:00"), op("2023-01-01T03:00")]);
        assert_eq!(series.bounds(), Some(("2023-01-01T01:00", "2023-01-01T03:00")));

        assert_eq!(SeriesData::OpCounts(vec![]).bounds(), None);
        let pie = SeriesData::NameValues(vec![NameValue {
            name: "find".to_string(),
            value: 2.0,
        }]);
        assert_eq!(pie.bounds(), None);
        assert_eq!(pie.len(), 1);
    }
}
