//! Mutations of the document.
//!
//! Every operation validates its input before touching the document, so a
//! failed call leaves the document exactly as it was.

use chrono::Month;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::LedgerError;
use crate::models::{
    month_name, CategoryLimits, Document, Expense, NewExpense, CATEGORIES, DEFAULT_DESCRIPTION,
};

impl Document {
    /// Append a new expense and return its id.
    pub(crate) fn add_expense(&mut self, input: NewExpense) -> Result<u64, LedgerError> {
        let input = validate(input)?;
        let id = self.allocate_id()?;
        self.expenses.push(Expense {
            id,
            amount: input.amount,
            category: input.category,
            description: input.description,
            date: input.date,
        });
        info!(id, "expense added");
        Ok(id)
    }

    /// Replace the mutable fields of an existing expense, keeping its position.
    pub(crate) fn update_expense(&mut self, id: u64, input: NewExpense) -> Result<(), LedgerError> {
        let input = validate(input)?;
        let expense = self
            .expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        expense.amount = input.amount;
        expense.category = input.category;
        expense.description = input.description;
        expense.date = input.date;
        info!(id, "expense updated");
        Ok(())
    }

    /// Remove an expense. Unknown ids are a no-op; returns whether anything
    /// was removed.
    pub(crate) fn delete_expense(&mut self, id: u64) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        let removed = self.expenses.len() != before;
        if removed {
            info!(id, "expense deleted");
        } else {
            debug!(id, "delete of unknown expense ignored");
        }
        removed
    }

    /// Overwrite a month's limits and set its monthly budget to their sum.
    ///
    /// Categories not supplied are dropped from that month. Returns the new
    /// monthly budget.
    pub(crate) fn set_category_limits(
        &mut self,
        month: Month,
        limits: CategoryLimits,
    ) -> Result<Decimal, LedgerError> {
        let invalid: Vec<String> = limits
            .iter()
            .filter(|(_, limit)| **limit < Decimal::ZERO)
            .map(|(category, _)| category.clone())
            .collect();
        if !invalid.is_empty() {
            return Err(LedgerError::InvalidLimits(invalid));
        }

        let total: Decimal = limits.values().copied().sum();
        let name = month_name(month).to_string();
        self.category_limits.insert(name.clone(), limits);
        self.monthly_budget.insert(name.clone(), total);
        info!(month = %name, %total, "category limits saved");
        Ok(total)
    }

    /// A month's limits merged over the all-zero default category set.
    pub(crate) fn limits_for_month(&self, month: Month) -> CategoryLimits {
        let mut merged: CategoryLimits = CATEGORIES
            .iter()
            .map(|c| (c.to_string(), Decimal::ZERO))
            .collect();
        if let Some(stored) = self.category_limits.get(month_name(month)) {
            merged.extend(stored.iter().map(|(k, v)| (k.clone(), *v)));
        }
        merged
    }

    pub(crate) fn monthly_budget_for(&self, month: Month) -> Decimal {
        self.monthly_budget
            .get(month_name(month))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Ids come from a monotonic counter so a deleted id is never handed out
    /// again. The counter never falls behind ids added by external edits.
    fn allocate_id(&mut self) -> Result<u64, LedgerError> {
        let max_id = self.max_id();
        let id = max_id
            .checked_add(1)
            .ok_or(LedgerError::IdsExhausted(max_id))?
            .max(self.next_id);
        self.next_id = id.checked_add(1).ok_or(LedgerError::IdsExhausted(id))?;
        Ok(id)
    }
}

fn validate(mut input: NewExpense) -> Result<NewExpense, LedgerError> {
    if input.amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(input.amount));
    }
    if input.category.trim().is_empty() {
        return Err(LedgerError::MissingCategory);
    }
    if input.description.is_empty() {
        input.description = DEFAULT_DESCRIPTION.to_string();
    }
    Ok(input)
}
