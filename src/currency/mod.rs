//! Display formatting for amounts, percentages and period titles.
//!
//! Values are rounded here and only here; the ledger and the aggregates keep
//! full precision.

use std::{fmt, str::FromStr};

use chrono::Datelike;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::transaction::TransactionKind;

pub const AMOUNT_DECIMALS: u32 = 2;
pub const SHARE_DECIMALS: u32 = 1;
pub const RATIO_DECIMALS: u32 = 0;

const SPANISH_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Language used for labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "es-ES")]
    Spanish,
    #[serde(rename = "en-US")]
    English,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Locale::Spanish => "es-ES",
            Locale::English => "en-US",
        })
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.trim().to_ascii_lowercase();
        match lowered.split(|c: char| c == '-' || c == '_').next() {
            Some("es") => Ok(Locale::Spanish),
            Some("en") => Ok(Locale::English),
            _ => Err(format!("unsupported locale `{value}`")),
        }
    }
}

/// Rounds half away from zero and pads to exactly `decimals` places.
pub fn round_for_display(value: Decimal, decimals: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimals);
    rounded
}

/// `$2500.00`, or `-$150.00` for negative values.
pub fn format_amount(value: Decimal, symbol: &str) -> String {
    let rounded = round_for_display(value, AMOUNT_DECIMALS);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{symbol}{}", rounded.abs())
    } else {
        format!("{symbol}{}", rounded.abs())
    }
}

/// Balance magnitude; callers convey the sign, e.g. through color.
pub fn format_balance(value: Decimal, symbol: &str) -> String {
    format_amount(value.abs(), symbol)
}

/// `+ $2500.00` for income, `- $350.00` for expenses.
pub fn format_signed_amount(kind: TransactionKind, value: Decimal, symbol: &str) -> String {
    let sign = match kind {
        TransactionKind::Income => '+',
        TransactionKind::Expense => '-',
    };
    format!("{sign} {}", format_amount(value.abs(), symbol))
}

/// Per-expense share with one decimal, e.g. `14.0%`.
pub fn format_share(value: Decimal) -> String {
    format!("{}%", round_for_display(value, SHARE_DECIMALS))
}

/// Aggregate expense-to-income ratio without decimals, e.g. `52%`.
pub fn format_ratio(value: Decimal) -> String {
    format!("{}%", round_for_display(value, RATIO_DECIMALS))
}

/// Header shown above the totals, e.g. `Presupuesto de octubre 2026`.
pub fn month_title(date: impl Datelike, locale: Locale) -> String {
    let index = date.month0() as usize;
    match locale {
        Locale::Spanish => format!("Presupuesto de {} {}", SPANISH_MONTHS[index], date.year()),
        Locale::English => format!("Budget for {} {}", ENGLISH_MONTHS[index], date.year()),
    }
}
