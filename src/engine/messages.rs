use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::models::{ForecastInput, ForecastOutput, IndicatorTable};

/// Errors surfaced to the UI. Cloned into snapshots and rendered as text.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// The data file could not be read or parsed
    LoadFailed(String),
    /// The forecaster rejected the minimum-wage series
    ForecastFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::LoadFailed(msg) => write!(f, "Falha ao carregar os dados: {}", msg),
            AppError::ForecastFailed(msg) => write!(f, "Falha na previsão: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// What caused a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunReason {
    Startup,
    SelectionChanged,
    ReloadRequested,
}

impl fmt::Display for RunReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunReason::Startup => write!(f, "startup"),
            RunReason::SelectionChanged => write!(f, "selection changed"),
            RunReason::ReloadRequested => write!(f, "reload requested"),
        }
    }
}

/// A request to run load + fit for one data file
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    pub path: PathBuf,
    pub reason: RunReason,
}

/// Everything one pipeline run produced. Immutable once built.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub source_path: PathBuf,
    pub table: IndicatorTable,
    pub forecast_input: ForecastInput,
    // A fit failure only blanks the forecast section
    pub forecast: Result<ForecastOutput, AppError>,
    pub elapsed: Duration,
}

/// The result returned by the worker
#[derive(Debug, Clone)]
pub struct RunResult {
    pub request: RunRequest,
    pub duration_ms: u128,

    // Success: the new front buffer
    // Failure: the load error
    pub result: Result<Arc<DashboardSnapshot>, AppError>,
}
