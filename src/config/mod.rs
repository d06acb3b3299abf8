//! Configuration module for the indicator dashboard.

pub mod data;
pub mod forecast;

mod debug; // Private: files use crate::config::DEBUG_FLAGS not crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod plot;

// Re-export commonly used items
pub use data::{DATA, DataConfig};
pub use forecast::{FORECAST, ForecastConfig};
pub use plot::PLOT_CONFIG;
