// Application layer - Use cases over the repository traits
pub mod chart_service;
pub mod error;
pub mod hatchet_repository;
pub mod hatchet_service;
pub mod log_service;
