// File-backed repository - one JSON document of precomputed aggregates per hatchet
use crate::application::hatchet_repository::{HatchetDatabase, HatchetRepository};
use crate::domain::hatchet::{HatchetInfo, NameValue, OpCount, RemoteStat};
use crate::domain::log_record::{LogFilter, LogPage, LogRecord};
use crate::domain::time_window::TimeWindow;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct JsonRepository {
    dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct HatchetDocument {
    info: HatchetInfo,
    #[serde(default)]
    op_stats: Vec<OpCount>,
    #[serde(default)]
    slow_ops: Vec<OpCount>,
    #[serde(default)]
    ops_counts: Vec<NameValue>,
    #[serde(default)]
    accepted_conns: Vec<NameValue>,
    #[serde(default)]
    conn_time: Vec<RemoteStat>,
    #[serde(default)]
    conn_total: Vec<RemoteStat>,
    #[serde(default)]
    reslen: Vec<NameValue>,
    #[serde(default)]
    logs: Vec<LogRecord>,
    #[serde(default)]
    slow_logs: Vec<LogRecord>,
}

impl JsonRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            anyhow::bail!("invalid hatchet name '{}'", name);
        }
        Ok(self.dir.join(format!("{name}.json")))
    }
}

#[async_trait]
impl HatchetRepository for JsonRepository {
    async fn list_hatchets(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("Failed to read data directory {}", self.dir.display()))?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn open(&self, name: &str) -> Result<Box<dyn HatchetDatabase>> {
        let path = self.path_for(name)?;
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("hatchet '{}' not found", name))?;
        let document: HatchetDocument = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::debug!(
            "Opened hatchet {} ({} logs, {} slow ops)",
            name,
            document.logs.len(),
            document.slow_ops.len()
        );
        Ok(Box::new(JsonHatchet { document }))
    }
}

struct JsonHatchet {
    document: HatchetDocument,
}

/// Keep rows whose timestamp falls in the requested window.
fn clip<T: Clone>(rows: &[T], duration: &str, timestamp: impl Fn(&T) -> &str) -> Vec<T> {
    if duration.is_empty() {
        return rows.to_vec();
    }
    let window = TimeWindow::from_duration(duration);
    rows.iter()
        .filter(|row| window.contains(timestamp(row)))
        .cloned()
        .collect()
}

#[async_trait]
impl HatchetDatabase for JsonHatchet {
    fn info(&self) -> HatchetInfo {
        self.document.info.clone()
    }

    async fn average_op_time(&self, duration: &str) -> Result<Vec<OpCount>> {
        Ok(clip(&self.document.op_stats, duration, |op| op.date.as_str()))
    }

    async fn slow_ops_counts(&self, duration: &str) -> Result<Vec<OpCount>> {
        Ok(clip(&self.document.slow_ops, duration, |op| op.date.as_str()))
    }

    async fn ops_counts(&self, _duration: &str) -> Result<Vec<NameValue>> {
        Ok(self.document.ops_counts.clone())
    }

    async fn accepted_conns_counts(&self, _duration: &str) -> Result<Vec<NameValue>> {
        Ok(self.document.accepted_conns.clone())
    }

    async fn connection_stats(&self, kind: &str, _duration: &str) -> Result<Vec<RemoteStat>> {
        match kind {
            "time" => Ok(self.document.conn_time.clone()),
            "total" => Ok(self.document.conn_total.clone()),
            other => anyhow::bail!("unsupported connection stats type '{}'", other),
        }
    }

    async fn reslen_by_clients(&self, _duration: &str) -> Result<Vec<NameValue>> {
        Ok(self.document.reslen.clone())
    }

    async fn logs(&self, filter: &LogFilter) -> Result<LogPage> {
        let mut logs: Vec<LogRecord> = self
            .document
            .logs
            .iter()
            .filter(|record| filter.matches(record))
            .skip(filter.offset)
            .take(filter.limit + 1)
            .cloned()
            .collect();

        let has_more = logs.len() > filter.limit;
        logs.truncate(filter.limit);
        Ok(LogPage { logs, has_more })
    }

    async fn slow_op_logs(&self, duration: &str) -> Result<Vec<LogRecord>> {
        Ok(clip(&self.document.slow_logs, duration, |record| record.timestamp.as_str()))
    }
}
