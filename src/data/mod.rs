// Input file decoding
pub mod cells;
pub mod loader;

// Re-export commonly used items
pub use loader::load_indicator_table;
