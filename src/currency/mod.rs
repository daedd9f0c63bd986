use std::fmt;

use chrono::{DateTime, TimeZone};

use crate::ledger::TransactionKind;

/// Currency symbol for an ISO 4217 code; unknown codes render as `"<CODE> "`.
pub fn symbol_for(code: &str) -> String {
    match code.trim().to_ascii_uppercase().as_str() {
        "USD" | "AUD" | "CAD" | "NZD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" | "CNY" => "¥".into(),
        other => format!("{other} "),
    }
}

/// Formats `amount` with two decimals, e.g. `$12.50` or `-$3.00`.
pub fn format_money(amount: f64, code: &str) -> String {
    let body = format!("{}{:.2}", symbol_for(code), amount.abs());
    if amount < 0.0 && body_is_nonzero(amount) {
        format!("-{body}")
    } else {
        body
    }
}

/// Formats a transaction amount with a leading `+` for income and `-` for expenses.
pub fn format_signed(amount: f64, kind: TransactionKind, code: &str) -> String {
    let sign = match kind {
        TransactionKind::Income => '+',
        TransactionKind::Expense => '-',
    };
    format!("{sign}{}", format_money(amount.abs(), code))
}

/// Share of a total with one decimal place, e.g. `62.5`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}")
}

/// Month abbreviation and unpadded day, e.g. `Jan 5`.
pub fn format_short_date<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    timestamp.format("%b %-d").to_string()
}

// Rounds away "-$0.00" for tiny negative values.
fn body_is_nonzero(amount: f64) -> bool {
    (amount.abs() * 100.0).round() > 0.0
}
