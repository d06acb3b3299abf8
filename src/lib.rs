#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod ui;
pub mod utils;

// Pipeline scheduling and the front buffer the UI reads
pub mod engine;

// Re-export commonly used types
pub use analysis::{AdditiveForecaster, ForecastError};
pub use data::load_indicator_table;
pub use domain::{Indicator, IndicatorSelection};
pub use engine::{DashboardEngine, DashboardSnapshot, run_pipeline};
pub use models::{ForecastInput, ForecastOutput, IndicatorTable};
pub use ui::IndicatorDashboardApp;

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

use crate::config::DATA;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Spreadsheet (.xlsx/.xls/.ods) or CSV file with the indicator columns
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,
}

impl Cli {
    pub fn data_path(&self) -> PathBuf {
        self.data
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATA.default_path))
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(
    cc: &eframe::CreationContext,
    data_path: PathBuf,
    initial: DashboardSnapshot,
) -> Box<dyn eframe::App> {
    let engine = DashboardEngine::new(data_path, initial);
    let app = ui::IndicatorDashboardApp::new(cc, engine);
    Box::new(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_path_defaults_to_fixed_file() {
        let cli = Cli::parse_from(["indicadores"]);
        assert_eq!(cli.data_path(), PathBuf::from("dados_mesclados.xlsx"));

        let cli = Cli::parse_from(["indicadores", "--data", "outros.csv"]);
        assert_eq!(cli.data_path(), PathBuf::from("outros.csv"));
    }
}
