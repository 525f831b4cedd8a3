mod category;
pub(crate) mod date;
mod document;
mod expense;
mod month;

pub use category::{is_known_category, resolve_category, CATEGORIES};
pub use document::{CategoryLimits, Document, DOCUMENT_VERSION};
pub use expense::{Expense, NewExpense, DEFAULT_DESCRIPTION};
pub use month::{current_month, month_name, month_number, parse_month, MonthFilter};
