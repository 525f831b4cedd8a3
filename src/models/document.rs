use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Expense;

/// Schema version written by this build. Documents without a `version` field
/// predate versioning and are treated as version 1.
pub const DOCUMENT_VERSION: u32 = 2;

/// Category name -> limit.
pub type CategoryLimits = BTreeMap<String, Decimal>;

/// The single persisted value: all budgets and expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Legacy global budget, always zero once upgraded.
    #[serde(default)]
    pub budget: Decimal,
    /// Month name -> category limits.
    #[serde(default)]
    pub category_limits: BTreeMap<String, CategoryLimits>,
    /// Month name -> sum of that month's limits. Written by
    /// `set_category_limits` only, never recomputed on load.
    #[serde(default)]
    pub monthly_budget: BTreeMap<String, Decimal>,
    /// Insertion ordered.
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub next_id: u64,
}

fn default_version() -> u32 {
    DOCUMENT_VERSION
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            budget: Decimal::ZERO,
            category_limits: BTreeMap::new(),
            monthly_budget: BTreeMap::new(),
            expenses: Vec::new(),
            next_id: 1,
        }
    }
}

impl Document {
    pub fn expense(&self, id: u64) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn max_id(&self) -> u64 {
        self.expenses.iter().map(|e| e.id).max().unwrap_or(0)
    }
}
