// Log service - fetches log pages and renders them as tables
use crate::application::error::DashboardError;
use crate::application::hatchet_repository::HatchetRepository;
use crate::domain::log_record::{LogFilter, LogRecord, Severity};
use crate::infrastructure::log_templates::{LogTableContext, TableTemplate};
use std::sync::Arc;

/// Legacy table query parameters, as received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogQuery {
    pub component: String,
    pub severity: String,
    pub context: String,
    pub offset: usize,
    pub duration: String,
}

impl LogQuery {
    /// Parse a raw `offset` parameter; empty means the first page.
    pub fn parse_offset(raw: &str) -> Result<usize, DashboardError> {
        if raw.is_empty() {
            return Ok(0);
        }
        raw.parse().map_err(|_| DashboardError::InvalidParameter {
            name: "offset",
            value: raw.to_string(),
        })
    }

    fn filter(&self, limit: usize) -> LogFilter {
        LogFilter {
            component: non_empty(&self.component),
            severity: self.severity.parse::<Severity>().ok(),
            context: non_empty(&self.context),
            offset: self.offset,
            limit,
        }
    }

    fn next_url(&self, hatchet: &str, page_size: usize) -> String {
        format!(
            "/hatchets/{}/logs?component={}&severity={}&context={}&offset={}",
            urlencoding::encode(hatchet),
            urlencoding::encode(&self.component),
            urlencoding::encode(&self.severity),
            urlencoding::encode(&self.context),
            self.offset.saturating_add(page_size)
        )
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[derive(Clone)]
pub struct LogService {
    repository: Arc<dyn HatchetRepository>,
    components: Arc<[String]>,
    page_size: usize,
}

impl LogService {
    pub fn new(repository: Arc<dyn HatchetRepository>, components: Arc<[String]>, page_size: usize) -> Self {
        Self {
            repository,
            components,
            page_size,
        }
    }

    pub async fn render_logs(
        &self,
        hatchet: &str,
        mode: &str,
        query: &LogQuery,
    ) -> Result<String, DashboardError> {
        let template = TableTemplate::select(mode);
        let database = self
            .repository
            .open(hatchet)
            .await
            .map_err(DashboardError::DatasetUnavailable)?;
        let summary = database.info().summary();

        let (logs, has_more): (Vec<LogRecord>, bool) = match template {
            TableTemplate::SlowOps => {
                let logs = database
                    .slow_op_logs(&query.duration)
                    .await
                    .map_err(DashboardError::Query)?;
                (logs, false)
            }
            TableTemplate::Legacy => {
                let page = database
                    .logs(&query.filter(self.page_size))
                    .await
                    .map_err(DashboardError::Query)?;
                (page.logs, page.has_more)
            }
        };
        tracing::debug!("{} log rows for {} ({:?})", logs.len(), hatchet, template);

        let next_url = query.next_url(hatchet, self.page_size);
        let ctx = LogTableContext {
            hatchet,
            logs: &logs,
            summary: &summary,
            component: &query.component,
            severity: &query.severity,
            context: &query.context,
            seq: query.offset.saturating_add(1),
            has_more,
            next_url: &next_url,
            components: &self.components,
        };
        Ok(template.render(&ctx))
    }
}
