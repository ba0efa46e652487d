use std::fmt::Write;

use num_format::Locale;

use crate::services::{
    calculator::Schedule, shared::format::format_amount, state::CalculatorState,
};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#f9fafb;color:#111827}\
.container{max-width:960px;margin:0 auto;padding:1rem}\
.card{background:#fff;border:1px solid #e5e7eb;border-radius:.5rem;padding:1.5rem}\
.uploads{display:grid;grid-template-columns:repeat(auto-fit,minmax(280px,1fr));gap:1rem}\
.upload{border:2px dashed #d1d5db;border-radius:.5rem;padding:1rem;text-align:center}\
.uploaded{margin-top:.5rem;color:#16a34a}\
.error{margin-top:1rem;padding:.5rem;background:#fee2e2;border:1px solid #f87171;color:#b91c1c;border-radius:.25rem}\
button{margin-top:1rem;padding:.5rem 1rem;background:#2563eb;color:#fff;border:0;border-radius:.25rem;cursor:pointer}\
button:disabled{background:#9ca3af;cursor:not-allowed}\
table{width:100%;border-collapse:collapse}\
th,td{border:1px solid #e5e7eb;padding:.5rem}\
td.amount{text-align:right}";

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn upload_form(
    title: &str,
    action: &str,
    accept: &str,
    button: &str,
    status: Option<String>,
) -> String {
    let status = status
        .map(|status| format!("<p class=\"uploaded\">✓ {}</p>", escape_html(&status)))
        .unwrap_or_default();
    format!(
        "<div class=\"upload\">\
         <form method=\"post\" action=\"{action}\" enctype=\"multipart/form-data\">\
         <label>{title}<br><input type=\"file\" name=\"file\" accept=\"{accept}\" required></label>\
         <br><button type=\"submit\">{button}</button>\
         </form>{status}</div>"
    )
}

pub fn render_schedule_table(title: &str, schedule: &Schedule, locale: &Locale) -> String {
    let mut rows = String::new();
    for row in schedule {
        // writing into a String cannot fail
        let _ = write!(
            rows,
            "<tr><td>{}</td><td class=\"amount\">{}</td><td class=\"amount\">{}</td><td class=\"amount\">{}</td></tr>",
            row.payment_label(),
            format_amount(row.opening_balance, locale),
            format_amount(row.interest, locale),
            format_amount(row.total_payable, locale),
        );
    }

    format!(
        "<section><h3>{}</h3><table><thead><tr>\
         <th>If paid by</th>\
         <th>Opening Balance FOR 2023-24</th>\
         <th>Current year Interest up to the month</th>\
         <th>Total payable</th>\
         </tr></thead><tbody>{}</tbody></table></section>",
        escape_html(title),
        rows
    )
}

pub fn render_page(state: &CalculatorState, locale: &Locale) -> String {
    let csv_status = state
        .wage_records
        .as_ref()
        .map(|records| format!("CSV File Uploaded ({} wage rows)", records.len()));
    let workbook_status = state
        .workbook
        .as_ref()
        .map(|workbook| format!("Excel File Uploaded ({} sheets)", workbook.sheets.len()));

    let disabled = if state.can_calculate() { "" } else { " disabled" };

    let error = state
        .error
        .as_deref()
        .map(|error| format!("<div class=\"error\" role=\"alert\">{}</div>", escape_html(error)))
        .unwrap_or_default();

    let tables = state
        .tables
        .as_ref()
        .map(|tables| {
            format!(
                "{}{}",
                render_schedule_table(
                    "AMOUNT PAYABLE TILL DATE OF PAYMENT IN 2023-24 (8.33%)",
                    &tables.table_833,
                    locale
                ),
                render_schedule_table(
                    "AMOUNT PAYABLE TILL DATE OF PAYMENT IN 2023-24 (1.16%)",
                    &tables.table_116,
                    locale
                ),
            )
        })
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>Pension Calculator</title><style>{STYLE}</style></head>\
         <body><div class=\"container\"><div class=\"card\"><h2>Pension Calculator</h2>\
         <div class=\"uploads\">{}{}</div>\
         <form method=\"post\" action=\"/calculate\"><button type=\"submit\"{disabled}>Calculate Pension</button></form>\
         {error}{tables}</div></div></body></html>",
        upload_form("Upload Wage CSV File", "/upload/csv", ".csv", "Choose CSV", csv_status),
        upload_form(
            "Upload Calculator Excel File",
            "/upload/workbook",
            ".xlsx",
            "Choose Excel",
            workbook_status
        ),
    )
}
