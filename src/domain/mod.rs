// Domain types and value objects
pub mod indicator;

// Re-export commonly used types
pub use indicator::{Indicator, IndicatorSelection};
