//! Reads the indicator spreadsheet into an [`IndicatorTable`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use calamine::{Data, Range, Reader, open_workbook_auto};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::DATA;
use crate::data::cells::RawCell;
use crate::domain::Indicator;
use crate::models::{IndicatorRow, IndicatorTable};

static EMPTY_CELL: RawCell = RawCell::Empty;

/// Header row plus data rows, decoded but not yet typed.
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

/// A file format the loader can decode into a [`RawSheet`].
pub trait TableSource {
    fn read_sheet(&self, path: &Path) -> Result<RawSheet>;

    /// A unique identifier for this implementation (for logs).
    fn signature(&self) -> &'static str;
}

/// Excel / OpenDocument workbooks. Only the first worksheet is read.
pub struct SpreadsheetSource;

impl TableSource for SpreadsheetSource {
    fn read_sheet(&self, path: &Path) -> Result<RawSheet> {
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("Failed to open spreadsheet: {}", path.display()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| anyhow!("Spreadsheet has no worksheets: {}", path.display()))?
            .with_context(|| format!("Failed to read first worksheet of {}", path.display()))?;

        sheet_from_range(&range).ok_or_else(|| anyhow!("Spreadsheet is empty: {}", path.display()))
    }

    fn signature(&self) -> &'static str {
        "spreadsheet"
    }
}

/// First row is the header; `None` for an empty worksheet.
fn sheet_from_range(range: &Range<Data>) -> Option<RawSheet> {
    let mut rows = range.rows();
    let headers = rows
        .next()?
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();
    let rows = rows
        .map(|row| row.iter().map(decode_workbook_cell).collect())
        .collect();
    Some(RawSheet { headers, rows })
}

fn decode_workbook_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Empty,
        Data::Float(value) => RawCell::Number(*value),
        Data::Int(value) => RawCell::Number(*value as f64),
        Data::String(text) => RawCell::Text(text.clone()),
        Data::DateTime(datetime) => RawCell::ExcelDate(datetime.as_f64()),
        Data::DateTimeIso(text) => RawCell::IsoDate(text.clone()),
        // #N/A and friends are missing values, like an empty cell
        Data::Error(_) => RawCell::Empty,
        other => RawCell::Text(other.to_string()),
    }
}

/// Comma- or semicolon-separated text. The delimiter is sniffed from the header line.
pub struct CsvSource;

impl TableSource for CsvSource {
    fn read_sheet(&self, path: &Path) -> Result<RawSheet> {
        let delimiter = sniff_delimiter(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV: {}", path.display()))?;

        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read CSV header: {}", path.display()))?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record
                .with_context(|| format!("Failed to read CSV record {}", index + 1))?;
            rows.push(
                record
                    .iter()
                    .map(|field| {
                        if field.is_empty() {
                            RawCell::Empty
                        } else {
                            RawCell::Text(field.to_string())
                        }
                    })
                    .collect(),
            );
        }

        Ok(RawSheet { headers, rows })
    }

    fn signature(&self) -> &'static str {
        "csv"
    }
}

fn sniff_delimiter(path: &Path) -> Result<u8> {
    let file = File::open(path).with_context(|| format!("Failed to open CSV: {}", path.display()))?;
    let mut header_line = String::new();
    BufReader::new(file)
        .read_line(&mut header_line)
        .with_context(|| format!("Failed to read CSV header: {}", path.display()))?;
    let semicolons = header_line.matches(';').count();
    let commas = header_line.matches(',').count();
    Ok(if semicolons > commas { b';' } else { b',' })
}

/// Picks the decoder from the file extension.
pub fn source_for_path(path: &Path) -> Result<Box<dyn TableSource>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Box::new(SpreadsheetSource)),
        "csv" => Ok(Box::new(CsvSource)),
        other => bail!(
            "Unsupported input format '{}' for {} (expected .xlsx, .xls, .ods or .csv)",
            other,
            path.display()
        ),
    }
}

/// Column positions of the fields we need, resolved from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub minimum_wage: usize,
    pub inflation: usize,
    pub household_debt: usize,
}

impl ColumnMap {
    pub fn from_headers(headers: &[String]) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let date = DATA
            .columns
            .date
            .iter()
            .find_map(|name| find(*name))
            .ok_or_else(|| {
                anyhow!(
                    "Missing date column (expected one of {:?}); found {:?}",
                    DATA.columns.date,
                    headers
                )
            })?;
        let indicator_column = |indicator: Indicator| {
            find(indicator.column_name()).ok_or_else(|| {
                anyhow!(
                    "Missing column '{}'; found {:?}",
                    indicator.column_name(),
                    headers
                )
            })
        };

        Ok(Self {
            date,
            minimum_wage: indicator_column(Indicator::MinimumWage)?,
            inflation: indicator_column(Indicator::Inflation)?,
            household_debt: indicator_column(Indicator::HouseholdDebt)?,
        })
    }

    fn index_of(&self, indicator: Indicator) -> usize {
        match indicator {
            Indicator::MinimumWage => self.minimum_wage,
            Indicator::Inflation => self.inflation,
            Indicator::HouseholdDebt => self.household_debt,
        }
    }
}

/// Types every data row of the sheet. Fully blank rows are skipped; any other
/// row with an unusable date or value fails the whole load.
pub fn rows_from_sheet(sheet: &RawSheet) -> Result<Vec<IndicatorRow>> {
    let columns = ColumnMap::from_headers(&sheet.headers)?;
    let mut rows = Vec::with_capacity(sheet.rows.len());

    for (index, cells) in sheet.rows.iter().enumerate() {
        // Spreadsheet row number as the user sees it (header is row 1)
        let line = index + 2;
        if cells.iter().all(RawCell::is_empty) {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_loader_details {
                log::info!("Skipping blank row {}", line);
            }
            continue;
        }

        let cell = |position: usize| cells.get(position).unwrap_or(&EMPTY_CELL);

        let date = cell(columns.date).as_date().ok_or_else(|| {
            anyhow!(
                "Row {}: cannot parse '{:?}' as a date",
                line,
                cell(columns.date)
            )
        })?;
        let value = |indicator: Indicator| {
            let raw = cell(columns.index_of(indicator));
            raw.as_number().ok_or_else(|| {
                anyhow!(
                    "Row {}: column '{}' holds a non-numeric value {:?}",
                    line,
                    indicator,
                    raw
                )
            })
        };

        rows.push(IndicatorRow::new(
            date,
            value(Indicator::MinimumWage)?,
            value(Indicator::Inflation)?,
            value(Indicator::HouseholdDebt)?,
        ));
    }

    Ok(rows)
}

/// Load the whole table. Any failure is fatal for the run: there is no fallback source.
pub fn load_indicator_table(path: &Path) -> Result<IndicatorTable> {
    let source = source_for_path(path)?;
    let sheet = source
        .read_sheet(path)
        .with_context(|| format!("Failed to load indicator data from {}", path.display()))?;

    log::debug!(
        "Read {} rows via {} source; headers: {:?}",
        sheet.rows.len(),
        source.signature(),
        sheet.headers
    );

    let rows = rows_from_sheet(&sheet)
        .with_context(|| format!("Invalid indicator data in {}", path.display()))?;
    let table = IndicatorTable::new(rows);

    let duplicates = table.duplicate_dates();
    if !duplicates.is_empty() {
        log::warn!(
            "{} dates appear more than once in {} (first: {})",
            duplicates.len(),
            path.display(),
            duplicates[0]
        );
    }

    Ok(table)
}
