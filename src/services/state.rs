use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{
    calculator::{calculate_pension_tables, PensionTables, ScheduleConfig},
    errors::CalculatorError,
    parsers::{parse_csv_upload, parse_workbook_upload, WageRecord, WorkbookSummary},
};

/// What one browser session has uploaded and computed so far. Failed
/// operations only touch `error`; earlier uploads and tables survive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorState {
    pub wage_records: Option<Vec<WageRecord>>,
    pub workbook: Option<WorkbookSummary>,
    pub tables: Option<PensionTables>,
    pub error: Option<String>,
}

impl CalculatorState {
    pub fn can_calculate(&self) -> bool {
        self.wage_records.is_some() && self.workbook.is_some()
    }

    pub fn upload_csv(&mut self, file: &[u8], file_name: Option<&str>) {
        match parse_csv_upload(file, file_name) {
            Ok(records) => {
                info!("Wage CSV uploaded with {} rows", records.len());
                self.wage_records = Some(records);
                self.error = None;
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn upload_workbook(&mut self, file: &[u8], file_name: Option<&str>) {
        match parse_workbook_upload(file, file_name) {
            Ok(workbook) => {
                info!("Calculator workbook uploaded with {} sheets", workbook.sheets.len());
                self.workbook = Some(workbook);
                self.error = None;
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn calculate(&mut self, config: &ScheduleConfig) -> Result<(), CalculatorError> {
        if !self.can_calculate() {
            self.fail(CalculatorError::MissingInput);
            return Err(CalculatorError::MissingInput);
        }

        self.tables = Some(calculate_pension_tables(config));
        self.error = None;
        info!(
            "Calculated pension tables at {}% p.a.",
            config.annual_rate_percent
        );
        Ok(())
    }

    /// Records the failure as the session's error message.
    pub fn fail(&mut self, error: CalculatorError) {
        warn!("{}", error);
        self.error = Some(error.to_string());
    }
}
