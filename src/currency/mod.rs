//! Presentation formatting for money and dates.

use chrono::NaiveDate;

use crate::config::Config;

/// How amounts are rendered: symbol prefix, two decimals, grouped thousands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub decimal_separator: char,
}

impl CurrencyFormat {
    pub fn from_config(config: &Config) -> Self {
        Self {
            symbol: config.currency_symbol.clone(),
            decimal_separator: config.decimal_separator,
        }
    }

    fn grouping_separator(&self) -> char {
        if self.decimal_separator == ',' {
            '.'
        } else {
            ','
        }
    }

    /// Formats `amount` rounded to two decimals, e.g. `R$ 1.234,50`.
    pub fn format(&self, amount: f64) -> String {
        let cents = (amount.abs() * 100.0).round() as u128;
        let whole = group_digits(cents / 100, self.grouping_separator());
        let fraction = cents % 100;
        let sign = if amount < 0.0 && cents != 0 { "-" } else { "" };
        let number = format!("{sign}{whole}{}{fraction:02}", self.decimal_separator);
        if self.symbol.is_empty() {
            number
        } else {
            format!("{} {}", self.symbol, number)
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

fn group_digits(value: u128, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Formats a date with a chrono pattern, falling back to ISO when the pattern is unusable.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        return date.to_string();
    }
    out
}

/// Parses a user-supplied date: ISO `YYYY-MM-DD` first, then the display pattern.
pub fn parse_date(input: &str, pattern: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, pattern))
        .ok()
}
