pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS kv (
    key         TEXT PRIMARY KEY,
    value       TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Key holding the serialized document.
pub(crate) const DOCUMENT_KEY: &str = "expenseTrackerData";

/// Key holding the id of the expense an edit flow is working on.
pub(crate) const EDITING_EXPENSE_KEY: &str = "editingExpenseId";
