// Data models for the indicator dashboard
// Pure data: no UI or file-format concerns live here

pub mod forecast;
pub mod indicator_table;

// Re-export key types for convenience
pub use forecast::{ForecastInput, ForecastOutput, ForecastPoint, ForecastRow};
pub use indicator_table::{IndicatorRow, IndicatorTable};
