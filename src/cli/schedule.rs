use std::fs;
use std::path::Path;

use anyhow::Context;
use num_format::Locale;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing::info;

use crate::services::{
    calculator::{calculate_pension_tables, Schedule},
    config::AppConfig,
    parsers::{parse_csv_upload, parse_workbook_upload},
    shared::format::format_amount,
};

#[derive(Debug, Tabled, Serialize, Clone)]
struct StringifiedScheduleRow {
    #[tabled(rename = "If paid by")]
    payment_date: String,
    #[tabled(rename = "Opening Balance FOR 2023-24")]
    opening_balance: String,
    #[tabled(rename = "Current year Interest up to the month")]
    interest: String,
    #[tabled(rename = "Total payable")]
    total_payable: String,
}

pub struct ScheduleArgs {
    pub csv_path: String,
    pub workbook_path: String,
    pub json: bool,
}

fn stringify_schedule(schedule: &Schedule, locale: &Locale) -> Vec<StringifiedScheduleRow> {
    schedule
        .iter()
        .map(|row| StringifiedScheduleRow {
            payment_date: row.payment_label(),
            opening_balance: format_amount(row.opening_balance, locale),
            interest: format_amount(row.interest, locale),
            total_payable: format_amount(row.total_payable, locale),
        })
        .collect()
}

fn file_name(path: &str) -> Option<&str> {
    Path::new(path).file_name().and_then(|name| name.to_str())
}

pub fn schedule(args: ScheduleArgs, config: &AppConfig) -> anyhow::Result<()> {
    let csv_bytes = fs::read(&args.csv_path)
        .with_context(|| format!("Failed to read {}", args.csv_path))?;
    let workbook_bytes = fs::read(&args.workbook_path)
        .with_context(|| format!("Failed to read {}", args.workbook_path))?;

    let wage_records = parse_csv_upload(&csv_bytes, file_name(&args.csv_path))?;
    let workbook = parse_workbook_upload(&workbook_bytes, file_name(&args.workbook_path))?;
    info!(
        "Loaded {} wage rows and {} sheets",
        wage_records.len(),
        workbook.sheets.len()
    );

    let tables = calculate_pension_tables(&config.schedule);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tables)?);
        return Ok(());
    }

    let heading_style = Style::new().black().on_white().bold();
    for (title, schedule) in [
        (
            "AMOUNT PAYABLE TILL DATE OF PAYMENT IN 2023-24 (8.33%)",
            &tables.table_833,
        ),
        (
            "AMOUNT PAYABLE TILL DATE OF PAYMENT IN 2023-24 (1.16%)",
            &tables.table_116,
        ),
    ] {
        let table = Table::new(stringify_schedule(schedule, &config.locale)).to_string();
        println!("\n{}", title.style(heading_style));
        println!("{}", table);
    }
    Ok(())
}
