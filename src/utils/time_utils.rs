use chrono::{Datelike, Months, NaiveDate, TimeDelta};

use crate::config::DATA;

pub struct TimeUtils;

impl TimeUtils {
    pub const DAYS_IN_WEEK: f64 = 7.0;
    pub const DAYS_IN_YEAR: f64 = 365.25;
    pub const MONTHS_IN_YEAR: u32 = 12;

    /// Day zero of the 1900 Excel date system. Using the 30th (not the 31st)
    /// absorbs Excel's phantom 1900-02-29 for every serial after it.
    pub fn excel_epoch() -> NaiveDate {
        NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN)
    }

    pub fn unix_epoch() -> NaiveDate {
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
    }
}

/// Convert an Excel serial day number (fraction = time of day) into a date.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let whole_days = serial.floor() as i64;
    TimeUtils::excel_epoch().checked_add_signed(TimeDelta::try_days(whole_days)?)
}

/// Dates are plotted as (fractional) days since the Unix epoch.
pub fn date_to_plot_x(date: NaiveDate) -> f64 {
    (date - TimeUtils::unix_epoch()).num_days() as f64
}

pub fn plot_x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() {
        return None;
    }
    TimeUtils::unix_epoch().checked_add_signed(TimeDelta::try_days(x.round() as i64)?)
}

pub fn days_between(start: NaiveDate, end: NaiveDate) -> f64 {
    (end - start).num_days() as f64
}

/// `date` shifted forward by `months`, keeping the day of month where possible
/// and clamping to the last day otherwise (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// The `periods` monthly dates following `last` (exclusive), in order.
///
/// Every step is taken from `last` itself rather than from the previous step,
/// so a clamped month-end never drags later dates earlier.
pub fn monthly_timeline_after(last: NaiveDate, periods: u32) -> Vec<NaiveDate> {
    (1..=periods)
        .filter_map(|step| add_months(last, step))
        .collect()
}

/// Number of whole months from `start` to `end` (ignoring day of month).
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    (end.year() - start.year()) * TimeUtils::MONTHS_IN_YEAR as i32 + end.month() as i32
        - start.month() as i32
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATA.display_date_format).to_string()
}

/// Short axis label: `2024-03` style.
pub fn format_month(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn excel_serials_map_to_calendar_dates() {
        assert_eq!(excel_serial_to_date(45292.0), Some(ymd(2024, 1, 1)));
        assert_eq!(excel_serial_to_date(42005.0), Some(ymd(2015, 1, 1)));
        // Time-of-day fraction is dropped
        assert_eq!(excel_serial_to_date(45292.75), Some(ymd(2024, 1, 1)));
        assert_eq!(excel_serial_to_date(0.0), None);
        assert_eq!(excel_serial_to_date(f64::NAN), None);
    }

    #[test]
    fn plot_x_round_trips_through_dates() {
        let date = ymd(2024, 12, 1);
        let x = date_to_plot_x(date);
        assert_eq!(plot_x_to_date(x), Some(date));
        assert_eq!(date_to_plot_x(ymd(1970, 1, 2)), 1.0);
    }

    #[test]
    fn monthly_timeline_clamps_month_ends() {
        let timeline = monthly_timeline_after(ymd(2024, 1, 31), 3);
        assert_eq!(
            timeline,
            vec![ymd(2024, 2, 29), ymd(2024, 3, 31), ymd(2024, 4, 30)]
        );
    }

    #[test]
    fn monthly_timeline_spans_three_years() {
        let timeline = monthly_timeline_after(ymd(2024, 12, 1), 36);
        assert_eq!(timeline.len(), 36);
        assert_eq!(timeline.first(), Some(&ymd(2025, 1, 1)));
        assert_eq!(timeline.last(), Some(&ymd(2027, 12, 1)));
        assert_eq!(months_between(ymd(2024, 12, 1), ymd(2027, 12, 1)), 36);
    }
}
