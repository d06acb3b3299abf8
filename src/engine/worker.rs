use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use crate::analysis::AdditiveForecaster;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::load_indicator_table;

use super::messages::{AppError, DashboardSnapshot, RunRequest, RunResult};

/// Load the file, reshape the minimum-wage series, fit and predict.
///
/// Only a load failure is an `Err`; a forecast failure is carried inside the
/// snapshot so the rest of the page still renders.
pub fn run_pipeline(path: &Path) -> Result<DashboardSnapshot> {
    let start = Instant::now();

    let table = load_indicator_table(path)?;
    let forecast_input = table.forecast_input();

    let mut forecaster = AdditiveForecaster::default();
    let forecast = forecaster.forecast(&forecast_input).map_err(|e| {
        log::error!("Forecast failed for {}: {}", path.display(), e);
        AppError::ForecastFailed(e.to_string())
    });
    if let Some(sigma) = forecaster.residual_sigma() {
        log::debug!(
            "Forecaster: {} changepoints, seasonalities {:?}, residual sigma {:.2}",
            forecaster.changepoint_dates().len(),
            forecaster
                .active_seasonalities()
                .iter()
                .map(|s| (s.name, s.order))
                .collect::<Vec<_>>(),
            sigma
        );
    }

    let elapsed = start.elapsed();
    log::info!(
        "Pipeline run on {}: {} rows, forecast {} in {:.0?}",
        path.display(),
        table.len(),
        if forecast.is_ok() { "ok" } else { "failed" },
        elapsed
    );

    Ok(DashboardSnapshot {
        source_path: path.to_path_buf(),
        table,
        forecast_input,
        forecast,
        elapsed,
    })
}

/// Execute one request. Runs on the background thread.
pub fn execute(request: RunRequest) -> RunResult {
    let start = Instant::now();

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_pipeline_scheduling {
        log::info!("Worker picked up run ({})", request.reason);
    }

    let result = run_pipeline(&request.path)
        .map(Arc::new)
        .map_err(|e| AppError::LoadFailed(format!("{:#}", e)));

    RunResult {
        request,
        duration_ms: start.elapsed().as_millis(),
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::messages::RunReason;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn monthly_csv(months: usize) -> String {
        let mut out = String::from("Data,Salario_Minimo,IPCA,Endividamento\n");
        for i in 0..months {
            let year = 2015 + i / 12;
            let month = i % 12 + 1;
            let wage = 788.0 + 62.0 * (i / 12) as f64;
            out.push_str(&format!("{year}-{month:02}-01,{wage},0.4{},4{}.0\n", i % 10, i % 9));
        }
        out
    }

    #[test]
    fn pipeline_produces_table_and_forecast() {
        let file = csv_file(&monthly_csv(120));
        let snapshot = run_pipeline(file.path()).unwrap();

        assert_eq!(snapshot.table.len(), 120);
        assert_eq!(snapshot.forecast_input.len(), 120);
        let forecast = snapshot.forecast.as_ref().unwrap();
        assert_eq!(forecast.len(), 156);
        assert_eq!(forecast.future_rows().count(), 36);
    }

    #[test]
    fn forecast_failure_keeps_the_table() {
        let file = csv_file("Data,Salario_Minimo,IPCA,Endividamento\n2024-01-01,1412,0.42,48.1\n");
        let snapshot = run_pipeline(file.path()).unwrap();

        assert_eq!(snapshot.table.len(), 1);
        assert!(matches!(snapshot.forecast, Err(AppError::ForecastFailed(_))));
    }

    #[test]
    fn load_failure_is_reported_as_error() {
        let result = execute(RunRequest {
            path: "definitely/not/here.csv".into(),
            reason: RunReason::ReloadRequested,
        });
        assert!(matches!(result.result, Err(AppError::LoadFailed(_))));
        assert_eq!(result.request.reason, RunReason::ReloadRequested);
    }
}
