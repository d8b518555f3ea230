// Application state for HTTP handlers
use crate::application::chart_service::ChartService;
use crate::application::hatchet_service::HatchetService;
use crate::application::log_service::LogService;

#[derive(Clone)]
pub struct AppState {
    pub hatchet_service: HatchetService,
    pub chart_service: ChartService,
    pub log_service: LogService,
}
