// Forecasting model
pub mod forecaster;

// Re-export commonly used types
pub use forecaster::{AdditiveForecaster, ForecastError, Forecaster};
