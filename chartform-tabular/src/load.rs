use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::TabularError;
use crate::table::{Cell, Table};

/// The two source formats the upload form accepts, keyed off the file
/// extension (case-insensitive). Anything else is rejected at the upload
/// boundary before a table load is ever attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Excel,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<SourceFormat> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(SourceFormat::Csv),
            "xls" | "xlsx" => Some(SourceFormat::Excel),
            _ => None,
        }
    }
}

/// Parses the stored upload into a [`Table`]. `.csv` goes through the csv
/// reader; everything else is treated as a workbook and read from its
/// first sheet.
pub fn load_table(path: &Path) -> Result<Table, TabularError> {
    match SourceFormat::from_path(path) {
        Some(SourceFormat::Csv) => read_csv(path),
        _ => read_workbook(path),
    }
}

fn read_csv(path: &Path) -> Result<Table, TabularError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(parse_field).collect());
    }
    Ok(Table::new(headers, rows))
}

fn read_workbook(path: &Path) -> Result<Table, TabularError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(TabularError::NoSheets)??;
    let mut source_rows = range.rows();
    let headers: Vec<String> = source_rows
        .next()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<Cell>> = source_rows
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();
    Ok(Table::new(headers, rows))
}

fn parse_field(field: &str) -> Cell {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Cell::Null;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_nan() => Cell::Null,
        Ok(value) => Cell::Number(value),
        Err(_) => Cell::Text(field.to_string()),
    }
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Null,
        Data::Float(value) => Cell::Number(*value),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Bool(value) => Cell::Bool(*value),
        Data::String(text) => parse_field(text),
        Data::DateTime(datetime) => Cell::Number(datetime.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::Text(text.clone()),
        Data::Error(_) => Cell::Null,
    }
}
