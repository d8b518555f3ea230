// Infrastructure layer - External dependencies and adapters
pub mod chart_templates;
pub mod config;
pub mod http_response;
pub mod json_repository;
pub mod log_templates;
