// Request errors - every variant is terminal for the request that raised it
use crate::domain::chart::ChartKey;
use crate::domain::dispatch::DispatchError;
use crate::infrastructure::chart_templates::TemplateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("{0}")]
    Selection(#[from] DispatchError),

    #[error("invalid {name} '{value}'")]
    InvalidParameter { name: &'static str, value: String },

    #[error("hatchet unavailable: {0:#}")]
    DatasetUnavailable(anyhow::Error),

    #[error("query failed: {0:#}")]
    Query(anyhow::Error),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("no chart descriptor registered for {0}")]
    MissingDescriptor(ChartKey),
}
