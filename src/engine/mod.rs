pub mod core;
pub mod messages;
pub mod state;
pub mod worker;

// Re-export key components
pub use core::DashboardEngine;
pub use messages::{AppError, DashboardSnapshot, RunReason};
pub use worker::run_pipeline;
