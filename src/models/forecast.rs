use chrono::NaiveDate;
use itertools::Itertools;

use crate::utils::time_utils::date_to_plot_x;

/// One `(ds, y)` observation fed to the forecaster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    pub ds: NaiveDate,
    pub y: f64,
}

/// The minimum-wage series reshaped for the forecaster. Rebuilt on every run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastInput {
    points: Vec<ForecastPoint>,
}

impl ForecastInput {
    pub fn new(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Observations with a value, in date order. Missing `y` rows are not
    /// used for fitting but their dates still get a prediction.
    pub fn observed(&self) -> Vec<ForecastPoint> {
        let mut observed: Vec<ForecastPoint> =
            self.points.iter().copied().filter(|p| !p.y.is_nan()).collect();
        observed.sort_by_key(|p| p.ds);
        observed
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.iter().map(|p| p.ds).max()
    }

    pub fn plot_points(&self) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .map(|p| [date_to_plot_x(p.ds), p.y])
            .collect()
    }
}

/// Model output for one timestamp of the history + horizon timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRow {
    pub ds: NaiveDate,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
    pub trend: f64,
    pub seasonal: f64,
    /// `true` for rows after the last observed date
    pub is_future: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastOutput {
    pub rows: Vec<ForecastRow>,
}

impl ForecastOutput {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn future_rows(&self) -> impl Iterator<Item = &ForecastRow> {
        self.rows.iter().filter(|row| row.is_future)
    }

    pub fn history_rows(&self) -> impl Iterator<Item = &ForecastRow> {
        self.rows.iter().filter(|row| !row.is_future)
    }

    pub fn last_observed_date(&self) -> Option<NaiveDate> {
        self.history_rows().map(|row| row.ds).last()
    }

    pub fn yhat_points(&self) -> Vec<[f64; 2]> {
        self.rows
            .iter()
            .map(|row| [date_to_plot_x(row.ds), row.yhat])
            .collect()
    }

    /// The uncertainty band as one convex quad per pair of consecutive rows.
    pub fn interval_bands(&self) -> Vec<[[f64; 2]; 4]> {
        self.rows
            .iter()
            .tuple_windows()
            .map(|(a, b)| {
                let (xa, xb) = (date_to_plot_x(a.ds), date_to_plot_x(b.ds));
                [
                    [xa, a.yhat_lower],
                    [xb, b.yhat_lower],
                    [xb, b.yhat_upper],
                    [xa, a.yhat_upper],
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(ds: NaiveDate, yhat: f64, is_future: bool) -> ForecastRow {
        ForecastRow {
            ds,
            yhat,
            yhat_lower: yhat - 10.0,
            yhat_upper: yhat + 10.0,
            trend: yhat,
            seasonal: 0.0,
            is_future,
        }
    }

    #[test]
    fn observed_drops_missing_and_sorts() {
        let input = ForecastInput::new(vec![
            ForecastPoint { ds: ymd(2024, 3, 1), y: 3.0 },
            ForecastPoint { ds: ymd(2024, 1, 1), y: 1.0 },
            ForecastPoint { ds: ymd(2024, 2, 1), y: f64::NAN },
        ]);
        let observed = input.observed();
        assert_eq!(observed.len(), 2);
        assert_eq!(observed[0].ds, ymd(2024, 1, 1));
        assert_eq!(input.last_date(), Some(ymd(2024, 3, 1)));
        assert_eq!(input.len(), 3);
    }

    #[test]
    fn history_and_future_split() {
        let output = ForecastOutput {
            rows: vec![
                row(ymd(2024, 11, 1), 100.0, false),
                row(ymd(2024, 12, 1), 110.0, false),
                row(ymd(2025, 1, 1), 120.0, true),
            ],
        };
        assert_eq!(output.history_rows().count(), 2);
        assert_eq!(output.future_rows().count(), 1);
        assert_eq!(output.last_observed_date(), Some(ymd(2024, 12, 1)));
        assert_eq!(output.yhat_points()[2][1], 120.0);
    }

    #[test]
    fn interval_bands_cover_each_step() {
        let output = ForecastOutput {
            rows: vec![
                row(ymd(2024, 12, 1), 100.0, false),
                row(ymd(2025, 1, 1), 120.0, true),
                row(ymd(2025, 2, 1), 130.0, true),
            ],
        };
        let bands = output.interval_bands();
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0][0][1], 90.0);
        assert_eq!(bands[0][2][1], 130.0);
        assert!(bands[1][0][0] < bands[1][1][0]);
    }
}
