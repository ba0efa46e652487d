use thiserror::Error;

/// User-facing failures of the upload/calculate flow. The `Display` output is
/// the exact message shown in the calculator's error banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculatorError {
    #[error("Error parsing CSV: {0}")]
    CsvParse(String),

    #[error("Error parsing Excel file: {0}")]
    WorkbookParse(String),

    #[error("Please upload both CSV and Excel files first")]
    MissingInput,
}

impl From<csv::Error> for CalculatorError {
    fn from(e: csv::Error) -> Self {
        CalculatorError::CsvParse(e.to_string())
    }
}

impl From<calamine::XlsxError> for CalculatorError {
    fn from(e: calamine::XlsxError) -> Self {
        CalculatorError::WorkbookParse(e.to_string())
    }
}
