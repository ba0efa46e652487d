use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;

use calamine::{open_workbook_from_rs, Reader, Xlsx};
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::errors::CalculatorError;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

const WAGE_MONTH_COLUMN: &str = "Wage Month";
const WAGES_COLUMN: &str = "Wages on which PF contribution was paid";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Csv,
    Xlsx,
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageRecord {
    pub month: Option<String>,
    pub wages: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSummary {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookSummary {
    pub sheets: Vec<SheetSummary>,
}

pub fn detect_file_format(file: &[u8], file_name: Option<&str>) -> UploadFormat {
    if file.is_empty() {
        return UploadFormat::Unsupported;
    }

    let extension = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_ascii_lowercase());

    if file.starts_with(ZIP_MAGIC) {
        return match extension.as_deref() {
            Some("xlsx") | None => UploadFormat::Xlsx,
            _ => UploadFormat::Unsupported,
        };
    }

    // a nameless upload is judged by its content alone
    match extension.as_deref() {
        Some("csv") | None => UploadFormat::Csv,
        _ => UploadFormat::Unsupported,
    }
}

// "12,500" and " 12500 " are both 12500; anything else is not a wage amount
fn parse_wage_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

pub fn parse_wage_csv(file: &[u8]) -> Result<Vec<WageRecord>, CalculatorError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(Cursor::new(file));

    let headers = rdr.headers()?;
    let month_index = headers.iter().position(|header| header == WAGE_MONTH_COLUMN);
    let wages_index = headers.iter().position(|header| header == WAGES_COLUMN);

    let mut records = vec![];
    for result in rdr.records() {
        let record = result?;
        // short rows simply lack the trailing cells
        let cell = |index: Option<usize>| {
            index
                .and_then(|index| record.get(index))
                .filter(|value| !value.is_empty())
        };
        records.push(WageRecord {
            month: cell(month_index).map(str::to_string),
            wages: cell(wages_index).and_then(parse_wage_amount),
        });
    }

    debug!("Parsed {} wage records", records.len());
    Ok(records)
}

pub fn parse_workbook(file: &[u8]) -> Result<WorkbookSummary, CalculatorError> {
    let mut workbook: Xlsx<Cursor<&[u8]>> = open_workbook_from_rs(Cursor::new(file))?;

    let mut sheets = vec![];
    for name in workbook.sheet_names() {
        let (rows, columns) = workbook.worksheet_range(&name)?.get_size();
        sheets.push(SheetSummary {
            name,
            rows,
            columns,
        });
    }

    debug!("Parsed workbook with {} sheets", sheets.len());
    Ok(WorkbookSummary { sheets })
}

pub fn parse_csv_upload(
    file: &[u8],
    file_name: Option<&str>,
) -> Result<Vec<WageRecord>, CalculatorError> {
    match detect_file_format(file, file_name) {
        UploadFormat::Csv => parse_wage_csv(file),
        UploadFormat::Xlsx => Err(CalculatorError::CsvParse(
            "expected a CSV file but received a spreadsheet".to_string(),
        )),
        UploadFormat::Unsupported => Err(CalculatorError::CsvParse(
            "file is empty or not a CSV file".to_string(),
        )),
    }
}

pub fn parse_workbook_upload(
    file: &[u8],
    file_name: Option<&str>,
) -> Result<WorkbookSummary, CalculatorError> {
    match detect_file_format(file, file_name) {
        UploadFormat::Xlsx => parse_workbook(file),
        UploadFormat::Csv | UploadFormat::Unsupported => Err(CalculatorError::WorkbookParse(
            "file is empty or not an .xlsx workbook".to_string(),
        )),
    }
}
