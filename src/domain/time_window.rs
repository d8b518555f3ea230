// Time window domain model - minute-precision (start, end) bounds for a chart
use serde::Serialize;

/// Number of characters kept from each timestamp ("YYYY-MM-DDTHH:MM").
pub const MINUTE_PRECISION: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

impl TimeWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Resolve the window for a request.
    ///
    /// An empty `raw_duration` keeps the dataset bounds as they are. Otherwise the
    /// duration must be `"<start>,<end>"`; anything else yields empty fields, and a
    /// token shorter than a full minute timestamp leaves its field empty.
    pub fn resolve(dataset_start: &str, dataset_end: &str, raw_duration: &str) -> Self {
        if raw_duration.is_empty() {
            return Self::new(dataset_start, dataset_end);
        }
        Self::from_duration(raw_duration)
    }

    pub fn from_duration(raw_duration: &str) -> Self {
        let tokens: Vec<&str> = raw_duration.split(',').collect();
        match tokens.as_slice() {
            [start, end] => Self::new(truncate_to_minute(start), truncate_to_minute(end)),
            _ => Self::default(),
        }
    }

    /// Replace the window with the span of the rows a query actually returned.
    pub fn snap_to(&mut self, bounds: Option<(&str, &str)>) {
        if let Some((first, last)) = bounds {
            self.start = first.to_string();
            self.end = last.to_string();
        }
    }

    /// Whether a row timestamp falls inside the window. Empty bounds are open.
    pub fn contains(&self, timestamp: &str) -> bool {
        let ts = truncate_to_minute(timestamp);
        let ts = if ts.is_empty() { timestamp } else { ts.as_str() };
        (self.start.is_empty() || ts >= self.start.as_str())
            && (self.end.is_empty() || ts <= self.end.as_str())
    }
}

fn truncate_to_minute(token: &str) -> String {
    if token.chars().count() < MINUTE_PRECISION {
        return String::new();
    }
    token.chars().take(MINUTE_PRECISION).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_duration_keeps_dataset_bounds() {
        let window = TimeWindow::resolve("2023-01-01T00:00:00.000Z", "2023-01-03T12:30:59.000Z", "");
        assert_eq!(window.start, "2023-01-01T00:00:00.000Z");
        assert_eq!(window.end, "2023-01-03T12:30:59.000Z");
    }

    #[test]
    fn test_tokens_truncated_to_minute() {
        let window = TimeWindow::resolve(
            "ignored",
            "ignored",
            "2023-01-01T00:00:15.123Z,2023-01-02T08:45:00Z",
        );
        assert_eq!(window, TimeWindow::new("2023-01-01T00:00", "2023-01-02T08:45"));

        let exact = TimeWindow::from_duration("2023-01-01T00:00,2023-01-02T00:00");
        assert_eq!(exact, TimeWindow::new("2023-01-01T00:00", "2023-01-02T00:00"));
    }

    #[test]
    fn test_wrong_token_count_yields_empty_window() {
        for raw in ["2023-01-01T00:00", "a,b,c", "2023-01-01T00:00,2023-01-02T00:00,2023-01-03T00:00"] {
            assert_eq!(TimeWindow::from_duration(raw), TimeWindow::default(), "{raw}");
        }
    }

    #[test]
    fn test_short_token_leaves_field_empty() {
        let window = TimeWindow::from_duration("2023-01-01,2023-01-02T00:00:00");
        assert_eq!(window.start, "");
        assert_eq!(window.end, "2023-01-02T00:00");
    }

    #[test]
    fn test_snap_to_actual_rows() {
        let mut window = TimeWindow::from_duration("2023-01-01T00:00,2023-01-09T00:00");
        window.snap_to(Some(("2023-01-02T10:00", "2023-01-03T11:00")));
        assert_eq!(window, TimeWindow::new("2023-01-02T10:00", "2023-01-03T11:00"));

        window.snap_to(None);
        assert_eq!(window, TimeWindow::new("2023-01-02T10:00", "2023-01-03T11:00"));
    }

    #[test]
    fn test_contains() {
        let window = TimeWindow::new("2023-01-02T00:00", "2023-01-02T23:59");
        assert!(window.contains("2023-01-02T10:15:00.000Z"));
        assert!(!window.contains("2023-01-03T00:00:00.000Z"));
        assert!(TimeWindow::default().contains("anything"));
    }
}
