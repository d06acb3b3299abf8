//! Forecasting model configuration
//!
//! Defaults mirror the usual additive trend + seasonality setup: a flexible
//! piecewise-linear trend with sparse changepoints, and Fourier seasonality that
//! switches itself on only when the history is long enough to support it.

use crate::utils::TimeUtils;

/// A single Fourier seasonality component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalityConfig {
    pub name: &'static str,
    /// Period in days
    pub period_days: f64,
    pub fourier_order: usize,
    /// Minimum history span (days) before the component is enabled
    pub min_history_days: f64,
    /// Component is only enabled when the median observation spacing is below this (days)
    pub max_spacing_days: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastConfig {
    /// Number of monthly periods appended after the last observation
    pub horizon_months: u32,
    /// Maximum number of potential trend changepoints
    pub n_changepoints: usize,
    /// Changepoints are placed in this leading fraction of the history
    pub changepoint_range: f64,
    pub changepoint_prior_scale: f64,
    pub seasonality_prior_scale: f64,
    /// Prior scale for the base growth rate and offset
    pub trend_prior_scale: f64,
    /// Coverage of the uncertainty interval around yhat
    pub interval_width: f64,
    /// Minimum number of non-missing observations needed to fit
    pub min_observations: usize,
    pub seasonalities: &'static [SeasonalityConfig],
}

pub const YEARLY_SEASONALITY: SeasonalityConfig = SeasonalityConfig {
    name: "yearly",
    period_days: TimeUtils::DAYS_IN_YEAR,
    fourier_order: 10,
    min_history_days: 2.0 * TimeUtils::DAYS_IN_YEAR,
    max_spacing_days: f64::INFINITY,
};

pub const WEEKLY_SEASONALITY: SeasonalityConfig = SeasonalityConfig {
    name: "weekly",
    period_days: TimeUtils::DAYS_IN_WEEK,
    fourier_order: 3,
    min_history_days: 2.0 * TimeUtils::DAYS_IN_WEEK,
    max_spacing_days: TimeUtils::DAYS_IN_WEEK,
};

pub const FORECAST: ForecastConfig = ForecastConfig {
    horizon_months: 36,
    n_changepoints: 25,
    changepoint_range: 0.8,
    changepoint_prior_scale: 0.05,
    seasonality_prior_scale: 10.0,
    trend_prior_scale: 5.0,
    interval_width: 0.80,
    min_observations: 2,
    seasonalities: &[YEARLY_SEASONALITY, WEEKLY_SEASONALITY],
};
