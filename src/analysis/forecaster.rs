//! Additive trend + seasonality forecaster.
//!
//! `y(t) = g(t) + s(t) + e` where `g` is a piecewise-linear trend with sparse
//! changepoints and `s` a sum of Fourier series. Fitted by penalized least
//! squares (Gaussian priors as ridge penalties), so results are deterministic
//! for a given input.

use std::f64::consts::PI;
use std::fmt;

use chrono::NaiveDate;
use statrs::distribution::{ContinuousCDF, Normal};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::forecast::SeasonalityConfig;
use crate::config::{FORECAST, ForecastConfig};
use crate::models::{ForecastInput, ForecastOutput, ForecastPoint, ForecastRow};
use crate::utils::maths_utils::{dot, linspace_indices, max_abs, ridge_least_squares};
use crate::utils::time_utils::{date_to_plot_x, days_between, monthly_timeline_after};

/// Penalty used on every column in the first (variance-estimating) pass
const STAGE_ONE_RIDGE: f64 = 1e-6;
/// Lower bound on the residual variance (scaled units) so penalties never vanish
const MIN_SIGMA_SQ: f64 = 1e-6;
/// Lower bound on any single ridge penalty
const MIN_PENALTY: f64 = 1e-8;

/// Error types for model fitting and prediction
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Fewer usable observations than the model needs
    InsufficientData { required: usize, actual: usize },
    /// An observation is infinite
    InvalidValue { date: NaiveDate, value: f64 },
    /// All observations fall on the same date
    ZeroTimeSpan,
    /// The normal equations could not be solved
    NumericalError(String),
    /// `predict` called before a successful `fit`
    NotFitted,
}

impl fmt::Display for ForecastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastError::InsufficientData { required, actual } => write!(
                f,
                "Insufficient data: need at least {} observations, got {}",
                required, actual
            ),
            ForecastError::InvalidValue { date, value } => {
                write!(f, "Invalid value {} on {}", value, date)
            }
            ForecastError::ZeroTimeSpan => {
                write!(f, "All observations share one date; cannot fit a trend")
            }
            ForecastError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
            ForecastError::NotFitted => write!(f, "Model has not been fitted"),
        }
    }
}

impl std::error::Error for ForecastError {}

pub type Result<T> = std::result::Result<T, ForecastError>;

/// Anything that can be fitted on `(ds, y)` data and predict at given dates.
pub trait Forecaster {
    fn fit(&mut self, input: &ForecastInput) -> Result<()>;

    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ForecastRow>>;

    fn is_fitted(&self) -> bool;
}

/// A seasonality that passed the auto-enable checks, with its effective order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveSeasonality {
    pub name: &'static str,
    pub period_days: f64,
    pub order: usize,
}

impl ActiveSeasonality {
    fn features(&self, day: f64, out: &mut Vec<f64>) {
        for n in 1..=self.order {
            let angle = 2.0 * PI * n as f64 * day / self.period_days;
            out.push(angle.sin());
            out.push(angle.cos());
        }
    }

    fn n_columns(&self) -> usize {
        2 * self.order
    }
}

#[derive(Debug, Clone)]
struct FittedModel {
    start: NaiveDate,
    /// Last input date, observed or not; later dates are future rows
    history_end: NaiveDate,
    span_days: f64,
    y_scale: f64,
    changepoints: Vec<f64>,
    seasonalities: Vec<ActiveSeasonality>,
    /// `[k, m, deltas.., seasonal..]`
    coefficients: Vec<f64>,
    /// Residual standard deviation, scaled units
    sigma: f64,
}

impl FittedModel {
    fn scaled_time(&self, ds: NaiveDate) -> f64 {
        days_between(self.start, ds) / self.span_days
    }

    fn n_trend_columns(&self) -> usize {
        2 + self.changepoints.len()
    }

    /// (trend, seasonal) in scaled units
    fn components(&self, ds: NaiveDate) -> (f64, f64) {
        let row = design_row(
            self.scaled_time(ds),
            date_to_plot_x(ds),
            &self.changepoints,
            &self.seasonalities,
        );
        let split = self.n_trend_columns();
        let trend = dot(&row[..split], &self.coefficients[..split]);
        let seasonal = dot(&row[split..], &self.coefficients[split..]);
        (trend, seasonal)
    }
}

/// Build one design-matrix row: `[t, 1, (t - s_j)+ .., sin/cos ..]`.
///
/// `t` is scaled time (0..1 over the history); Fourier terms use absolute days
/// so the phase does not depend on where the history starts.
fn design_row(
    t: f64,
    day: f64,
    changepoints: &[f64],
    seasonalities: &[ActiveSeasonality],
) -> Vec<f64> {
    let mut row = Vec::with_capacity(2 + changepoints.len() + 2 * seasonalities.len());
    row.push(t);
    row.push(1.0);
    row.extend(changepoints.iter().map(|&s| (t - s).max(0.0)));
    for seasonality in seasonalities {
        seasonality.features(day, &mut row);
    }
    row
}

pub struct AdditiveForecaster {
    config: ForecastConfig,
    fitted: Option<FittedModel>,
}

impl Default for AdditiveForecaster {
    fn default() -> Self {
        Self::new(FORECAST)
    }
}

impl AdditiveForecaster {
    pub fn new(config: ForecastConfig) -> Self {
        Self {
            config,
            fitted: None,
        }
    }

    /// Changepoint locations as dates (empty before fitting).
    pub fn changepoint_dates(&self) -> Vec<NaiveDate> {
        let Some(model) = &self.fitted else {
            return Vec::new();
        };
        model
            .changepoints
            .iter()
            .filter_map(|&s| {
                let offset = (s * model.span_days).round() as i64;
                model
                    .start
                    .checked_add_signed(chrono::TimeDelta::try_days(offset)?)
            })
            .collect()
    }

    pub fn active_seasonalities(&self) -> Vec<ActiveSeasonality> {
        self.fitted
            .as_ref()
            .map(|m| m.seasonalities.clone())
            .unwrap_or_default()
    }

    /// Residual standard deviation in data units.
    pub fn residual_sigma(&self) -> Option<f64> {
        self.fitted.as_ref().map(|m| m.sigma * m.y_scale)
    }

    /// History dates (unique, sorted) followed by `horizon_months` monthly
    /// periods after the last one.
    pub fn make_future_timeline(&self, input: &ForecastInput) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = input.points().iter().map(|p| p.ds).collect();
        dates.sort();
        dates.dedup();
        if let Some(&last) = dates.last() {
            dates.extend(monthly_timeline_after(last, self.config.horizon_months));
        }
        dates
    }

    /// Fit, extend the timeline and predict over history + horizon.
    pub fn forecast(&mut self, input: &ForecastInput) -> Result<ForecastOutput> {
        self.fit(input)?;
        let timeline = self.make_future_timeline(input);
        Ok(ForecastOutput {
            rows: self.predict(&timeline)?,
        })
    }

    fn changepoints_for(&self, t: &[f64]) -> Vec<f64> {
        let hist_size = (t.len() as f64 * self.config.changepoint_range).floor() as usize;
        let n_changepoints = self.config.n_changepoints.min(hist_size.saturating_sub(1));
        if n_changepoints == 0 {
            return Vec::new();
        }
        let mut changepoints: Vec<f64> = linspace_indices(0, hist_size - 1, n_changepoints + 1)
            .into_iter()
            .skip(1)
            .map(|i| t[i])
            .collect();
        changepoints.dedup();
        changepoints
    }

    fn seasonalities_for(&self, points: &[ForecastPoint], span_days: f64) -> Vec<ActiveSeasonality> {
        let spacing = median_spacing_days(points);
        // Leave room for the two base trend columns
        let max_order = points.len().saturating_sub(2) / 2;

        self.config
            .seasonalities
            .iter()
            .filter(|s: &&SeasonalityConfig| {
                span_days >= s.min_history_days && spacing < s.max_spacing_days
            })
            .map(|s| ActiveSeasonality {
                name: s.name,
                period_days: s.period_days,
                order: s.fourier_order.min(max_order),
            })
            .filter(|s| s.order > 0)
            .collect()
    }
}

fn median_spacing_days(points: &[ForecastPoint]) -> f64 {
    let mut gaps: Vec<f64> = points
        .windows(2)
        .map(|w| days_between(w[0].ds, w[1].ds))
        .filter(|gap| *gap > 0.0)
        .collect();
    if gaps.is_empty() {
        return f64::INFINITY;
    }
    gaps.sort_by(|a, b| a.total_cmp(b));
    gaps[gaps.len() / 2]
}

fn sum_squared_residuals(design: &[Vec<f64>], y: &[f64], beta: &[f64]) -> f64 {
    design
        .iter()
        .zip(y)
        .map(|(row, &target)| (target - dot(row, beta)).powi(2))
        .sum()
}

impl Forecaster for AdditiveForecaster {
    fn fit(&mut self, input: &ForecastInput) -> Result<()> {
        self.fitted = None;

        if let Some(bad) = input.points().iter().find(|p| p.y.is_infinite()) {
            return Err(ForecastError::InvalidValue {
                date: bad.ds,
                value: bad.y,
            });
        }

        let observed = input.observed();
        if observed.len() < self.config.min_observations {
            return Err(ForecastError::InsufficientData {
                required: self.config.min_observations,
                actual: observed.len(),
            });
        }

        let (Some(first), Some(last)) = (observed.first(), observed.last()) else {
            return Err(ForecastError::InsufficientData {
                required: self.config.min_observations,
                actual: 0,
            });
        };
        let (start, last_observed) = (first.ds, last.ds);
        let history_end = input.last_date().unwrap_or(last_observed).max(last_observed);
        let span_days = days_between(start, last_observed);
        if span_days <= 0.0 {
            return Err(ForecastError::ZeroTimeSpan);
        }

        let raw_y: Vec<f64> = observed.iter().map(|p| p.y).collect();
        let y_scale = match max_abs(&raw_y) {
            scale if scale > 0.0 => scale,
            _ => 1.0,
        };
        let y: Vec<f64> = raw_y.iter().map(|v| v / y_scale).collect();
        let t: Vec<f64> = observed
            .iter()
            .map(|p| days_between(start, p.ds) / span_days)
            .collect();
        let days: Vec<f64> = observed.iter().map(|p| date_to_plot_x(p.ds)).collect();

        let changepoints = self.changepoints_for(&t);
        let seasonalities = self.seasonalities_for(&observed, span_days);
        let n_seasonal: usize = seasonalities.iter().map(ActiveSeasonality::n_columns).sum();

        // Stage 1: no changepoints, near-unpenalized, to estimate the noise level
        let stage_one_design: Vec<Vec<f64>> = t
            .iter()
            .zip(&days)
            .map(|(&ti, &day)| design_row(ti, day, &[], &seasonalities))
            .collect();
        let stage_one_penalties = vec![STAGE_ONE_RIDGE; 2 + n_seasonal];
        let stage_one_beta = ridge_least_squares(&stage_one_design, &y, &stage_one_penalties)
            .ok_or_else(|| {
                ForecastError::NumericalError("singular system in variance estimate".to_string())
            })?;
        let sigma_sq = (sum_squared_residuals(&stage_one_design, &y, &stage_one_beta)
            / y.len() as f64)
            .max(MIN_SIGMA_SQ);

        // Stage 2: full model, priors as ridge penalties sigma^2 / scale^2
        let penalty = |scale: f64| (sigma_sq / (scale * scale)).max(MIN_PENALTY);
        let mut penalties = vec![penalty(self.config.trend_prior_scale); 2];
        penalties.extend(std::iter::repeat_n(
            penalty(self.config.changepoint_prior_scale),
            changepoints.len(),
        ));
        penalties.extend(std::iter::repeat_n(
            penalty(self.config.seasonality_prior_scale),
            n_seasonal,
        ));

        let design: Vec<Vec<f64>> = t
            .iter()
            .zip(&days)
            .map(|(&ti, &day)| design_row(ti, day, &changepoints, &seasonalities))
            .collect();
        let coefficients = ridge_least_squares(&design, &y, &penalties).ok_or_else(|| {
            ForecastError::NumericalError("singular system in model fit".to_string())
        })?;
        let sigma = (sum_squared_residuals(&design, &y, &coefficients) / y.len() as f64).sqrt();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_fit_diagnostics {
            log::info!(
                "Fit on {} obs: {} changepoints, seasonalities {:?}, sigma {:.5} (scaled), stage-1 sigma^2 {:.3e}",
                y.len(),
                changepoints.len(),
                seasonalities.iter().map(|s| (s.name, s.order)).collect::<Vec<_>>(),
                sigma,
                sigma_sq
            );
        }

        self.fitted = Some(FittedModel {
            start,
            history_end,
            span_days,
            y_scale,
            changepoints,
            seasonalities,
            coefficients,
            sigma,
        });
        Ok(())
    }

    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ForecastRow>> {
        let model = self.fitted.as_ref().ok_or(ForecastError::NotFitted)?;

        let coverage = self.config.interval_width.clamp(0.0, 0.999);
        let z = Normal::new(0.0, 1.0)
            .map_err(|e| ForecastError::NumericalError(e.to_string()))?
            .inverse_cdf(0.5 + coverage / 2.0);
        let half_width = z * model.sigma * model.y_scale;

        Ok(dates
            .iter()
            .map(|&ds| {
                let (trend, seasonal) = model.components(ds);
                let yhat = (trend + seasonal) * model.y_scale;
                ForecastRow {
                    ds,
                    yhat,
                    yhat_lower: yhat - half_width,
                    yhat_upper: yhat + half_width,
                    trend: trend * model.y_scale,
                    seasonal: seasonal * model.y_scale,
                    is_future: ds > model.history_end,
                }
            })
            .collect())
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time_utils::add_months;
    use itertools::Itertools;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monthly_input(start: NaiveDate, values: &[f64]) -> ForecastInput {
        ForecastInput::new(
            values
                .iter()
                .enumerate()
                .map(|(i, &y)| ForecastPoint {
                    ds: add_months(start, i as u32).unwrap(),
                    y,
                })
                .collect(),
        )
    }

    /// 2015-01..2024-12, stepping up every January like the real minimum wage.
    fn minimum_wage_like() -> ForecastInput {
        let values: Vec<f64> = (0..120)
            .map(|i| 788.0 + 62.0 * (i / 12) as f64)
            .collect();
        monthly_input(ymd(2015, 1, 1), &values)
    }

    #[test]
    fn output_extends_history_by_36_months() {
        let input = minimum_wage_like();
        let output = AdditiveForecaster::default().forecast(&input).unwrap();

        assert_eq!(output.len(), 120 + 36);
        let future: Vec<NaiveDate> = output.future_rows().map(|r| r.ds).collect();
        assert_eq!(future.len(), 36);
        assert_eq!(future.first(), Some(&ymd(2025, 1, 1)));
        assert_eq!(future.last(), Some(&ymd(2027, 12, 1)));
        assert_eq!(output.last_observed_date(), Some(ymd(2024, 12, 1)));

        // Chronological, no duplicates, no gaps between months
        for (a, b) in output.rows.iter().tuple_windows() {
            assert!(a.ds < b.ds);
            assert_eq!(add_months(a.ds, 1), Some(b.ds));
        }
    }

    #[test]
    fn rising_series_forecast_keeps_rising() {
        let input = minimum_wage_like();
        let output = AdditiveForecaster::default().forecast(&input).unwrap();

        let last_year_mean: f64 =
            output.history_rows().skip(108).map(|r| r.yhat).sum::<f64>() / 12.0;
        let future: Vec<&ForecastRow> = output.future_rows().collect();
        let first_future_year: f64 = future[..12].iter().map(|r| r.yhat).sum::<f64>() / 12.0;
        let last_future_year: f64 = future[24..].iter().map(|r| r.yhat).sum::<f64>() / 12.0;

        assert!(first_future_year > last_year_mean);
        assert!(last_future_year > first_future_year);
        assert!(future.iter().all(|r| r.yhat_lower <= r.yhat && r.yhat <= r.yhat_upper));
    }

    #[test]
    fn linear_series_is_tracked_closely() {
        let values: Vec<f64> = (0..48).map(|i| 1000.0 + 10.0 * i as f64).collect();
        let input = monthly_input(ymd(2020, 1, 1), &values);
        let mut model = AdditiveForecaster::default();
        let output = model.forecast(&input).unwrap();

        for (row, actual) in output.history_rows().zip(&values) {
            assert!(
                (row.yhat - actual).abs() / actual < 0.01,
                "{} vs {}",
                row.yhat,
                actual
            );
        }
        assert!(model.is_fitted());
        assert!(model.residual_sigma().unwrap() >= 0.0);
    }

    #[test]
    fn refits_are_bit_identical() {
        let input = minimum_wage_like();
        let first = AdditiveForecaster::default().forecast(&input).unwrap();
        let second = AdditiveForecaster::default().forecast(&input).unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.rows.iter().zip(&second.rows) {
            assert_eq!(a.yhat.to_bits(), b.yhat.to_bits());
        }
    }

    #[test]
    fn yearly_seasonality_needs_two_years() {
        let mut short = AdditiveForecaster::default();
        short
            .fit(&monthly_input(ymd(2023, 1, 1), &[1.0; 12]))
            .unwrap();
        assert!(short.active_seasonalities().is_empty());

        let mut long = AdditiveForecaster::default();
        long.fit(&minimum_wage_like()).unwrap();
        let names: Vec<&str> = long.active_seasonalities().iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["yearly"]);
        assert_eq!(long.changepoint_dates().len(), 25);
    }

    #[test]
    fn missing_values_are_skipped_but_predicted() {
        let mut values: Vec<f64> = (0..24).map(|i| 100.0 + i as f64).collect();
        values[5] = f64::NAN;
        let input = monthly_input(ymd(2022, 1, 1), &values);
        let output = AdditiveForecaster::default().forecast(&input).unwrap();
        assert_eq!(output.len(), 24 + 36);
        assert!(output.rows[5].yhat.is_finite());
    }

    #[test]
    fn trailing_missing_value_stays_in_history() {
        let mut values: Vec<f64> = (0..120)
            .map(|i| 788.0 + 62.0 * (i / 12) as f64)
            .collect();
        values[119] = f64::NAN;
        let input = monthly_input(ymd(2015, 1, 1), &values);
        let output = AdditiveForecaster::default().forecast(&input).unwrap();

        assert_eq!(output.len(), 120 + 36);
        assert_eq!(output.future_rows().count(), 36);
        assert_eq!(output.future_rows().next().map(|r| r.ds), Some(ymd(2025, 1, 1)));
        assert_eq!(output.last_observed_date(), Some(ymd(2024, 12, 1)));
        assert!(!output.rows[119].is_future);
        assert!(output.rows[119].yhat.is_finite());
    }

    #[test]
    fn too_few_observations_fail() {
        let input = monthly_input(ymd(2024, 1, 1), &[1412.0]);
        let err = AdditiveForecaster::default().forecast(&input).unwrap_err();
        assert_eq!(
            err,
            ForecastError::InsufficientData {
                required: 2,
                actual: 1
            }
        );

        let empty = ForecastInput::default();
        assert!(matches!(
            AdditiveForecaster::default().forecast(&empty),
            Err(ForecastError::InsufficientData { actual: 0, .. })
        ));
    }

    #[test]
    fn two_observations_are_enough() {
        let input = monthly_input(ymd(2024, 1, 1), &[1320.0, 1412.0]);
        let output = AdditiveForecaster::default().forecast(&input).unwrap();
        assert_eq!(output.len(), 38);
        let future: Vec<&ForecastRow> = output.future_rows().collect();
        assert!(future[35].yhat > future[0].yhat);
    }

    #[test]
    fn infinite_values_fail() {
        let input = monthly_input(ymd(2024, 1, 1), &[1.0, f64::INFINITY, 3.0]);
        assert!(matches!(
            AdditiveForecaster::default().forecast(&input),
            Err(ForecastError::InvalidValue { .. })
        ));
    }

    #[test]
    fn single_date_fails() {
        let input = ForecastInput::new(vec![
            ForecastPoint {
                ds: ymd(2024, 1, 1),
                y: 1.0,
            },
            ForecastPoint {
                ds: ymd(2024, 1, 1),
                y: 2.0,
            },
        ]);
        assert_eq!(
            AdditiveForecaster::default().forecast(&input).unwrap_err(),
            ForecastError::ZeroTimeSpan
        );
    }

    #[test]
    fn predict_before_fit_fails() {
        let model = AdditiveForecaster::default();
        assert!(!model.is_fitted());
        assert_eq!(
            model.predict(&[ymd(2024, 1, 1)]).unwrap_err(),
            ForecastError::NotFitted
        );
    }
}
