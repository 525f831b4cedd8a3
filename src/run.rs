mod cli;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::date::iso_to_stored;

pub(crate) use cli::as_cli;

/// Value following `name` (e.g. `--month March`), if present.
pub(crate) fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

pub(crate) fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

/// Arguments that are not flags. `valued` lists the flags that consume the
/// following argument.
pub(crate) fn positionals<'a>(args: &'a [String], valued: &[&str]) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if valued.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            out.push(arg.as_str());
        }
    }
    out
}

/// Parse a user-entered amount such as `12.50`, `$1,200` or `-3`.
pub(crate) fn parse_amount(input: &str) -> Result<Decimal> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    Decimal::from_str(&cleaned).with_context(|| format!("Invalid amount: {input}"))
}

/// Validate an ISO `YYYY-MM-DD` date and convert it to the stored form.
pub(crate) fn parse_input_date(input: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date (expected YYYY-MM-DD): {input}"))?;
    Ok(iso_to_stored(&date.format("%Y-%m-%d").to_string()))
}

pub(crate) fn parse_id(input: &str) -> Result<u64> {
    input
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Invalid expense id: {input}"))
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod run_tests;
