// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::chart_service::ChartService;
use crate::application::hatchet_repository::HatchetRepository;
use crate::application::hatchet_service::HatchetService;
use crate::application::log_service::LogService;
use crate::domain::chart::ChartCatalog;
use crate::infrastructure::chart_templates::ChartTemplates;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::json_repository::JsonRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = load_app_config()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Static registries, validated before serving
    let catalog = Arc::new(ChartCatalog::standard()?);
    let templates = Arc::new(ChartTemplates::standard());

    // Create repository (infrastructure layer)
    let repository: Arc<dyn HatchetRepository> = Arc::new(JsonRepository::new(&config.data.dir));

    // Create services (application layer)
    let components: Arc<[String]> = config.logs.components.clone().into();
    let state = Arc::new(AppState {
        hatchet_service: HatchetService::new(repository.clone()),
        chart_service: ChartService::new(repository.clone(), catalog, templates),
        log_service: LogService::new(repository, components, config.logs.page_size),
    });

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {}", config.server.bind))?;
    tracing::info!("Serving hatchets from {} on http://{}", config.data.dir, addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}
