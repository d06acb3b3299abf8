use chrono::NaiveDate;
use itertools::Itertools;

use crate::domain::Indicator;
use crate::models::forecast::{ForecastInput, ForecastPoint};
use crate::utils::time_utils::date_to_plot_x;

// ============================================================================
// IndicatorRow: one observation period
// ============================================================================

/// One observation period. Missing cells are stored as `NaN`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub minimum_wage: f64,
    pub inflation: f64,
    pub household_debt: f64,
}

impl IndicatorRow {
    pub fn new(date: NaiveDate, minimum_wage: f64, inflation: f64, household_debt: f64) -> Self {
        Self {
            date,
            minimum_wage,
            inflation,
            household_debt,
        }
    }

    pub fn value(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::MinimumWage => self.minimum_wage,
            Indicator::Inflation => self.inflation,
            Indicator::HouseholdDebt => self.household_debt,
        }
    }
}

// ============================================================================
// IndicatorTable: the loaded spreadsheet, sorted by date
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorTable {
    rows: Vec<IndicatorRow>,
}

impl IndicatorTable {
    /// Builds the table, ordering rows chronologically. The sort is stable so
    /// duplicate dates keep their file order.
    pub fn new(mut rows: Vec<IndicatorRow>) -> Self {
        rows.sort_by_key(|row| row.date);
        Self { rows }
    }

    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|row| row.date).collect()
    }

    pub fn column(&self, indicator: Indicator) -> Vec<f64> {
        self.rows.iter().map(|row| row.value(indicator)).collect()
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.rows.first()?.date, self.rows.last()?.date))
    }

    pub fn is_chronological(&self) -> bool {
        self.rows
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.date <= b.date)
    }

    /// Dates that appear on more than one row (allowed, but worth a warning).
    pub fn duplicate_dates(&self) -> Vec<NaiveDate> {
        self.rows
            .iter()
            .tuple_windows()
            .filter(|(a, b)| a.date == b.date)
            .map(|(a, _)| a.date)
            .dedup()
            .collect()
    }

    /// Chart points `[x, raw * multiplier]` for one indicator. Missing values
    /// stay `NaN` so the plotted line breaks instead of dropping to zero.
    pub fn scaled_series(&self, indicator: Indicator) -> Vec<[f64; 2]> {
        self.rows
            .iter()
            .map(|row| [date_to_plot_x(row.date), indicator.scale(row.value(indicator))])
            .collect()
    }

    /// Project (`Date`, `Salario_Minimo`) into the forecaster's `(ds, y)` shape.
    pub fn forecast_input(&self) -> ForecastInput {
        ForecastInput::new(
            self.rows
                .iter()
                .map(|row| ForecastPoint {
                    ds: row.date,
                    y: row.minimum_wage,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_table() -> IndicatorTable {
        IndicatorTable::new(vec![
            IndicatorRow::new(ymd(2024, 3, 1), 1412.0, 0.16, 47.9),
            IndicatorRow::new(ymd(2024, 1, 1), 1412.0, 0.42, 48.2),
            IndicatorRow::new(ymd(2024, 2, 1), 1412.0, 0.83, f64::NAN),
        ])
    }

    #[test]
    fn rows_are_sorted_by_date() {
        let table = sample_table();
        assert!(table.is_chronological());
        assert_eq!(
            table.dates(),
            vec![ymd(2024, 1, 1), ymd(2024, 2, 1), ymd(2024, 3, 1)]
        );
        assert_eq!(table.date_range(), Some((ymd(2024, 1, 1), ymd(2024, 3, 1))));
    }

    #[test]
    fn scaled_series_applies_multiplier_exactly() {
        let table = sample_table();
        for indicator in [Indicator::MinimumWage, Indicator::Inflation, Indicator::HouseholdDebt] {
            let raw = table.column(indicator);
            let scaled = table.scaled_series(indicator);
            assert_eq!(raw.len(), scaled.len());
            for (value, point) in raw.iter().zip(&scaled) {
                if value.is_nan() {
                    assert!(point[1].is_nan());
                } else {
                    assert_eq!(point[1], value * f64::from(indicator.multiplier()));
                }
            }
        }
    }

    #[test]
    fn duplicate_dates_are_kept_and_reported() {
        let table = IndicatorTable::new(vec![
            IndicatorRow::new(ymd(2024, 1, 1), 1.0, 0.0, 0.0),
            IndicatorRow::new(ymd(2024, 1, 1), 2.0, 0.0, 0.0),
            IndicatorRow::new(ymd(2024, 2, 1), 3.0, 0.0, 0.0),
        ]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.duplicate_dates(), vec![ymd(2024, 1, 1)]);
        // Stable sort keeps file order within the duplicate
        assert_eq!(table.column(Indicator::MinimumWage), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn forecast_input_projects_minimum_wage() {
        let input = sample_table().forecast_input();
        let points = input.points();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].ds, ymd(2024, 1, 1));
        assert_eq!(points[0].y, 1412.0);
    }

    #[test]
    fn empty_table_has_no_range() {
        let table = IndicatorTable::default();
        assert!(table.is_empty());
        assert!(table.date_range().is_none());
        assert!(table.is_chronological());
    }
}
