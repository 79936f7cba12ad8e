//! Display formatting for money and dates.

use chrono::{DateTime, Utc};
use stockroom_core::Money;

pub const CURRENCY_CODE: &str = "KES";

/// `KES 1,234.50`; negatives as `-KES 12.00`.
pub fn format_currency(amount: Money) -> String {
    let minor = amount.minor_units();
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();

    format!(
        "{sign}{CURRENCY_CODE} {}.{:02}",
        group_thousands(abs / 100),
        abs % 100
    )
}

/// `15 Jan 2023`.
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%-d %b %Y").to_string()
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
