// Repository traits for dataset and aggregate-query access
use crate::domain::hatchet::{HatchetInfo, NameValue, OpCount, RemoteStat};
use crate::domain::log_record::{LogFilter, LogPage, LogRecord};
use async_trait::async_trait;

#[async_trait]
pub trait HatchetRepository: Send + Sync {
    /// List all available dataset names
    async fn list_hatchets(&self) -> anyhow::Result<Vec<String>>;

    /// Open a dataset for the duration of one request
    async fn open(&self, name: &str) -> anyhow::Result<Box<dyn HatchetDatabase>>;
}

/// Aggregate queries over one dataset. Every query takes the raw `duration`
/// request parameter and returns an error distinctly from an empty series.
#[async_trait]
pub trait HatchetDatabase: Send + Sync {
    fn info(&self) -> HatchetInfo;

    /// Average operation time per op, in chronological order
    async fn average_op_time(&self, duration: &str) -> anyhow::Result<Vec<OpCount>>;

    /// Slow operation counts, in chronological order
    async fn slow_ops_counts(&self, duration: &str) -> anyhow::Result<Vec<OpCount>>;

    async fn ops_counts(&self, duration: &str) -> anyhow::Result<Vec<NameValue>>;

    async fn accepted_conns_counts(&self, duration: &str) -> anyhow::Result<Vec<NameValue>>;

    /// Accepted vs ended connections; `kind` is "time" or "total"
    async fn connection_stats(&self, kind: &str, duration: &str) -> anyhow::Result<Vec<RemoteStat>>;

    async fn reslen_by_clients(&self, duration: &str) -> anyhow::Result<Vec<NameValue>>;

    async fn logs(&self, filter: &LogFilter) -> anyhow::Result<LogPage>;

    async fn slow_op_logs(&self, duration: &str) -> anyhow::Result<Vec<LogRecord>>;
}
