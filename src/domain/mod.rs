// Domain layer - Chart selection, time windows and log annotation
pub mod chart;
pub mod dispatch;
pub mod hatchet;
pub mod highlight;
pub mod log_record;
pub mod time_window;
