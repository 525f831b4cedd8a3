use anyhow::{Context, Result};
use std::path::Path;

use crate::models::date::stored_to_iso;
use crate::models::Expense;

/// Write expenses to CSV in the given order. Returns the number of rows written.
pub(crate) fn export_to_csv(path: &Path, expenses: &[&Expense]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    wtr.write_record(["id", "date", "category", "description", "amount"])?;
    for expense in expenses {
        wtr.write_record([
            expense.id.to_string(),
            stored_to_iso(&expense.date),
            expense.category.clone(),
            expense.description.clone(),
            format!("{:.2}", expense.amount),
        ])?;
    }
    wtr.flush().context("Failed to write CSV file")?;
    Ok(expenses.len())
}
