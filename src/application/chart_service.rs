// Chart service - resolves a chart request, runs its aggregate query and renders it
use crate::application::error::DashboardError;
use crate::application::hatchet_repository::{HatchetDatabase, HatchetRepository};
use crate::domain::chart::ChartCatalog;
use crate::domain::dispatch::ChartSelection;
use crate::domain::hatchet::SeriesData;
use crate::domain::time_window::TimeWindow;
use crate::infrastructure::chart_templates::{index_page, ChartContext, ChartTemplates};
use std::sync::Arc;

#[derive(Clone)]
pub struct ChartService {
    repository: Arc<dyn HatchetRepository>,
    catalog: Arc<ChartCatalog>,
    templates: Arc<ChartTemplates>,
}

impl ChartService {
    pub fn new(
        repository: Arc<dyn HatchetRepository>,
        catalog: Arc<ChartCatalog>,
        templates: Arc<ChartTemplates>,
    ) -> Self {
        Self {
            repository,
            catalog,
            templates,
        }
    }

    /// Render one chart page. Any failure aborts the whole page.
    pub async fn render_chart(
        &self,
        hatchet: &str,
        attribute: &str,
        subtype: &str,
        duration: &str,
    ) -> Result<String, DashboardError> {
        let selection = ChartSelection::parse(attribute, subtype)?;
        let plan = selection.plan();
        tracing::debug!(
            "chart {} for {} (type={:?}, duration={:?}) -> {} {}",
            attribute,
            hatchet,
            subtype,
            duration,
            plan.chart_key,
            plan.family
        );

        let database = self
            .repository
            .open(hatchet)
            .await
            .map_err(DashboardError::DatasetUnavailable)?;
        let info = database.info();
        let summary = info.summary();
        let mut window = TimeWindow::resolve(&info.start, &info.end, duration);

        let series = fetch_series(database.as_ref(), selection, duration)
            .await
            .map_err(DashboardError::Query)?;
        if series.is_empty() {
            tracing::debug!("{} returned no {:?} rows for {}", plan.chart_key, plan.series_kind, hatchet);
        } else {
            tracing::debug!("{} returned {} {:?} rows", plan.chart_key, series.len(), plan.series_kind);
        }
        window.snap_to(series.bounds());

        let chart = self
            .catalog
            .get(plan.chart_key)
            .ok_or(DashboardError::MissingDescriptor(plan.chart_key))?;
        let template = self.templates.resolve(plan.family)?;

        let ctx = ChartContext {
            hatchet,
            series: &series,
            chart,
            chart_key: plan.chart_key,
            summary: &summary,
            window: &window,
            v_axis_label: plan.v_axis_label,
        };
        Ok(template.render(&ctx)?)
    }

    /// Chart selector page for a hatchet.
    pub async fn render_index(&self, hatchet: &str) -> Result<String, DashboardError> {
        let database = self
            .repository
            .open(hatchet)
            .await
            .map_err(DashboardError::DatasetUnavailable)?;
        Ok(index_page(hatchet, &self.catalog, &database.info().summary()))
    }
}

async fn fetch_series(
    database: &dyn HatchetDatabase,
    selection: ChartSelection,
    duration: &str,
) -> anyhow::Result<SeriesData> {
    let series = match selection {
        ChartSelection::Ops => SeriesData::OpCounts(database.average_op_time(duration).await?),
        ChartSelection::SlowOpsStats => SeriesData::OpCounts(database.slow_ops_counts(duration).await?),
        ChartSelection::SlowOpsCounts => SeriesData::NameValues(database.ops_counts(duration).await?),
        ChartSelection::ConnectionsAccepted => {
            SeriesData::NameValues(database.accepted_conns_counts(duration).await?)
        }
        ChartSelection::Connections(stat) => {
            SeriesData::Remotes(database.connection_stats(stat.as_str(), duration).await?)
        }
        ChartSelection::Reslen => SeriesData::NameValues(database.reslen_by_clients(duration).await?),
    };
    Ok(series)
}
