use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::date::stored_month;

pub const DEFAULT_DESCRIPTION: &str = "No description";

/// One recorded expense. `date` is kept in the stored `DD/MM/YYYY` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: u64,
    pub amount: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
}

impl Expense {
    /// Month number of the expense date, `None` for malformed dates.
    pub fn month_number(&self) -> Option<u32> {
        stored_month(&self.date)
    }
}

/// The mutable fields of an expense, as submitted by a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: String,
}

impl NewExpense {
    #[cfg(test)]
    pub fn new(amount: Decimal, category: &str, description: &str, date: &str) -> Self {
        Self {
            amount,
            category: category.to_string(),
            description: description.to_string(),
            date: date.to_string(),
        }
    }
}
