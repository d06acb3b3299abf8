//! Input file and column configuration

/// Header names expected in the input spreadsheet
pub struct ColumnNames {
    /// Accepted headers for the date column (first match wins)
    pub date: &'static [&'static str],
    pub minimum_wage: &'static str,
    pub inflation: &'static str,
    pub household_debt: &'static str,
}

pub struct DataConfig {
    /// Relative path of the spreadsheet read on every pipeline run
    pub default_path: &'static str,
    pub columns: ColumnNames,
    /// Text formats tried, in order, when a date cell holds a string
    pub date_formats: &'static [&'static str],
    /// Text formats that carry only a month (day is set to 1)
    pub month_formats: &'static [&'static str],
    /// Display format for dates in the table, tooltips and axis labels
    pub display_date_format: &'static str,
}

pub const DATA: DataConfig = DataConfig {
    default_path: "dados_mesclados.xlsx",
    columns: ColumnNames {
        date: &["Data", "Date"],
        minimum_wage: "Salario_Minimo",
        inflation: "IPCA",
        household_debt: "Endividamento",
    },
    date_formats: &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"],
    month_formats: &["%Y-%m", "%m/%Y"],
    display_date_format: "%Y-%m-%d",
};
