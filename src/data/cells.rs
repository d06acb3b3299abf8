//! Cell-level coercion shared by every input format.

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::DATA;
use crate::utils::time_utils::excel_serial_to_date;

/// A spreadsheet cell after format-specific decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Number(f64),
    Text(String),
    /// Excel serial day number from a date-formatted cell
    ExcelDate(f64),
    /// ISO 8601 date/datetime text (ODS and some xlsx writers)
    IsoDate(String),
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
];

impl RawCell {
    /// Coerce to a date. Plain numbers are read as Excel serial days.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            RawCell::ExcelDate(serial) | RawCell::Number(serial) => excel_serial_to_date(*serial),
            RawCell::IsoDate(text) | RawCell::Text(text) => parse_date_text(text),
            RawCell::Empty => None,
        }
    }

    /// Coerce to a number. Empty cells are missing observations (`NaN`);
    /// `None` means the cell holds something that is not a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawCell::Empty => Some(f64::NAN),
            RawCell::Number(value) => Some(*value),
            RawCell::Text(text) => parse_number_text(text),
            RawCell::ExcelDate(_) | RawCell::IsoDate(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }
}

pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime.date());
        }
    }
    for format in DATA.date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    // Month-only forms: pin the day to 1
    for format in DATA.month_formats {
        let padded = format!("{text}|01");
        let padded_format = format!("{format}|%d");
        if let Ok(date) = NaiveDate::parse_from_str(&padded, &padded_format) {
            return Some(date);
        }
    }
    // Serial numbers exported as text
    text.parse::<f64>().ok().and_then(excel_serial_to_date)
}

/// Parses `1412`, `1412.5`, `1.412,50`, `4,62`, `R$ 1.412,00` and `1,412.00`.
/// When both separators appear the last one is the decimal mark; a repeated
/// decimal mark is rejected. Blank text is a missing value.
pub fn parse_number_text(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }

    let commas = cleaned.matches(',').count();
    let dots = cleaned.matches('.').count();
    let normalized = match (commas, dots) {
        (0, 0) | (0, 1) => cleaned,
        // `1.412.000`: dots only group thousands
        (0, _) => cleaned.replace('.', ""),
        (1, 0) => cleaned.replace(',', "."),
        // `1,412,000`: commas only group thousands
        (_, 0) => cleaned.replace(',', ""),
        _ => {
            let last_comma = cleaned.rfind(',')?;
            let last_dot = cleaned.rfind('.')?;
            if last_comma > last_dot {
                if commas > 1 {
                    return None;
                }
                cleaned.replace('.', "").replace(',', ".")
            } else {
                if dots > 1 {
                    return None;
                }
                cleaned.replace(',', "")
            }
        }
    };
    normalized.parse::<f64>().ok()
}
