//! Expense dates.
//!
//! Dates are stored as `DD/MM/YYYY` strings and entered as ISO `YYYY-MM-DD`.
//! Stored values are never repaired: a date that does not split into three
//! components simply drops out of every monthly view.

use crate::error::LedgerError;

/// A stored date split into its components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDate<'a> {
    pub day: &'a str,
    pub month: u32,
    pub year: &'a str,
}

impl<'a> StoredDate<'a> {
    pub fn parse(s: &'a str) -> Result<Self, LedgerError> {
        let parts: Vec<&str> = s.split('/').collect();
        let [day, month, year] = parts.as_slice() else {
            return Err(LedgerError::MalformedDate(s.to_string()));
        };
        let month = month
            .trim()
            .parse::<u32>()
            .map_err(|_| LedgerError::MalformedDate(s.to_string()))?;
        Ok(Self {
            day: *day,
            month,
            year: *year,
        })
    }
}

/// Month number (1-12 for sane data) of a stored date, `None` when malformed.
pub fn stored_month(s: &str) -> Option<u32> {
    StoredDate::parse(s).ok().map(|d| d.month)
}

/// `YYYY-MM-DD` -> `DD/MM/YYYY`. Anything without three components yields "".
pub fn iso_to_stored(iso: &str) -> String {
    match iso.split('-').collect::<Vec<_>>().as_slice() {
        [y, m, d] => format!("{d}/{m}/{y}"),
        _ => String::new(),
    }
}

/// `DD/MM/YYYY` -> `YYYY-MM-DD`. Anything without three components yields "".
pub fn stored_to_iso(stored: &str) -> String {
    match stored.split('/').collect::<Vec<_>>().as_slice() {
        [d, m, y] => format!("{y}-{m}-{d}"),
        _ => String::new(),
    }
}

pub fn today_iso() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
