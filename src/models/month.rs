use chrono::{Datelike, Month};

/// English month names, indexed by `number - 1`. These are the keys of the
/// month-keyed maps in the document.
pub const MONTH_NAMES: [&str; 12] = [
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

/// Exact lookup of a full month name ("March" -> `Month::March`).
pub fn month_from_name(name: &str) -> Option<Month> {
    MONTH_NAMES
        .iter()
        .position(|m| *m == name)
        .and_then(|idx| Month::try_from(idx as u8 + 1).ok())
}

/// Lenient lookup for user input: exact names first, then case-insensitive
/// full names or three-letter abbreviations.
pub fn parse_month(input: &str) -> Option<Month> {
    let trimmed = input.trim();
    month_from_name(trimmed).or_else(|| trimmed.parse::<Month>().ok())
}

/// 1-based month number.
pub fn month_number(month: Month) -> u32 {
    month.number_from_month()
}

pub fn month_name(month: Month) -> &'static str {
    MONTH_NAMES[month.number_from_month() as usize - 1]
}

pub fn current_month() -> Month {
    let now = chrono::Local::now();
    Month::try_from(now.month() as u8).unwrap_or(Month::January)
}

/// Month filter used by list/summary views. `All` bypasses month matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Only(Month),
}

impl MonthFilter {
    pub fn parse(input: &str) -> Option<Self> {
        if input.trim().eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        parse_month(input).map(Self::Only)
    }

    pub fn matches(&self, month_number: u32) -> bool {
        match self {
            Self::All => true,
            Self::Only(m) => m.number_from_month() == month_number,
        }
    }
}

impl std::fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Only(m) => write!(f, "{}", month_name(*m)),
        }
    }
}
