// Log record domain model - parsed MongoDB log lines and their enumerations
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Component names offered by the log filter unless configured otherwise.
pub const DEFAULT_COMPONENTS: [&str; 16] = [
    "ACCESS", "ASIO", "COMMAND", "CONNPOOL", "CONTROL", "ELECTION", "FTDC", "INDEX", "INITSYNC",
    "NETWORK", "QUERY", "RECOVERY", "REPL", "SHARDING", "STORAGE", "WRITE",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    F,
    E,
    W,
    I,
    D,
    D2,
}

impl Severity {
    /// Canonical display order.
    pub const ALL: [Severity; 6] = [
        Severity::F,
        Severity::E,
        Severity::W,
        Severity::I,
        Severity::D,
        Severity::D2,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Severity::F => "F",
            Severity::E => "E",
            Severity::W => "W",
            Severity::I => "I",
            Severity::D => "D",
            Severity::D2 => "D2",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::F => "FATAL",
            Severity::E => "ERROR",
            Severity::W => "WARN",
            Severity::I => "INFO",
            Severity::D => "DEBUG",
            Severity::D2 => "DEBUG2",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.code() == s)
            .ok_or_else(|| format!("unknown severity '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: String,
    pub severity: Severity,
    pub component: String,
    #[serde(default)]
    pub context: String,
    pub message: String,
}

/// Filters applied to a paginated log query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogFilter {
    pub component: Option<String>,
    pub severity: Option<Severity>,
    pub context: Option<String>,
    pub offset: usize,
    pub limit: usize,
}

impl LogFilter {
    pub fn matches(&self, record: &LogRecord) -> bool {
        if let Some(component) = &self.component {
            if &record.component != component {
                return false;
            }
        }
        if let Some(severity) = self.severity {
            if record.severity != severity {
                return false;
            }
        }
        if let Some(context) = &self.context {
            let needle = context.to_lowercase();
            let in_context = record.context.to_lowercase().contains(&needle);
            if !in_context && !record.message.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// One page of log records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogPage {
    pub logs: Vec<LogRecord>,
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(severity: Severity, component: &str, context: &str, message: &str) -> LogRecord {
        LogRecord {
            timestamp: "2023-01-01T00:00:00.000Z".to_string(),
            severity,
            component: component.to_string(),
            context: context.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_severity_order_and_labels() {
        let codes: Vec<&str> = Severity::ALL.iter().map(|s| s.code()).collect();
        let labels: Vec<&str> = Severity::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(codes, vec!["F", "E", "W", "I", "D", "D2"]);
        assert_eq!(labels, vec!["FATAL", "ERROR", "WARN", "INFO", "DEBUG", "DEBUG2"]);
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("D2".parse::<Severity>(), Ok(Severity::D2));
        assert!("X".parse::<Severity>().is_err());
    }

    #[test]
    fn test_filter_matches() {
        let rec = record(Severity::W, "NETWORK", "conn42", "Connection ended");
        let filter = LogFilter {
            component: Some("NETWORK".to_string()),
            severity: Some(Severity::W),
            context: Some("CONN42".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&rec));

        let by_message = LogFilter {
            context: Some("ended".to_string()),
            ..Default::default()
        };
        assert!(by_message.matches(&rec));

        let wrong_component = LogFilter {
            component: Some("QUERY".to_string()),
            ..Default::default()
        };
        assert!(!wrong_component.matches(&rec));
    }
}
