//! Derived views over a loaded document: monthly totals, remaining budget,
//! per-category spend and limit warnings.
//!
//! Everything here is a pure function of the document and an explicit filter.
//! Expenses whose stored date does not split into three components never
//! count towards a month, but stay in the document untouched.

use chrono::Month;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{month_number, CategoryLimits, Document, Expense, MonthFilter};

/// Remaining budget at or below this is "low".
pub(crate) const LOW_BUDGET_THRESHOLD: Decimal = Decimal::ONE_HUNDRED;

/// Share of a category limit at which spending is flagged (0.9).
pub(crate) const LIMIT_WARNING_RATIO: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub(crate) fn parse(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(crate::models::resolve_category(input))
        }
    }

    fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(c) => c == category,
        }
    }
}

/// The month and category a view is looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ViewFilter {
    pub(crate) month: MonthFilter,
    pub(crate) category: CategoryFilter,
}

impl ViewFilter {
    pub(crate) fn new(month: MonthFilter, category: CategoryFilter) -> Self {
        Self { month, category }
    }

    #[cfg(test)]
    pub(crate) fn all() -> Self {
        Self::new(MonthFilter::All, CategoryFilter::All)
    }
}

fn in_month(expense: &Expense, month: Month) -> bool {
    expense.month_number() == Some(month_number(month))
}

pub(crate) fn total_expenses_for_month(doc: &Document, month: Month) -> Decimal {
    doc.expenses
        .iter()
        .filter(|e| in_month(e, month))
        .map(|e| e.amount)
        .sum()
}

/// Monthly budget minus the month's spending. Missing budgets count as zero,
/// and the result may be negative.
pub(crate) fn remaining_budget(doc: &Document, month: Month) -> Decimal {
    doc.monthly_budget_for(month) - total_expenses_for_month(doc, month)
}

pub(crate) fn spend_by_category(doc: &Document, month: Month) -> BTreeMap<String, Decimal> {
    doc.expenses
        .iter()
        .filter(|e| in_month(e, month))
        .fold(BTreeMap::new(), |mut acc, e| {
            *acc.entry(e.category.clone()).or_insert(Decimal::ZERO) += e.amount;
            acc
        })
}

/// Categories at or above 90% of their limit for a month.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct LimitStatus {
    pub(crate) warnings: Vec<String>,
}

impl LimitStatus {
    pub(crate) fn any_at_or_above_90_percent(&self) -> bool {
        !self.warnings.is_empty()
    }
}

pub(crate) fn limit_status(doc: &Document, month: Month) -> LimitStatus {
    let limits = doc.limits_for_month(month);
    let spent = spend_by_category(doc, month);
    let warnings = limits
        .iter()
        .filter(|(category, limit)| {
            let spent = spent.get(*category).copied().unwrap_or(Decimal::ZERO);
            **limit > Decimal::ZERO && spent >= **limit * LIMIT_WARNING_RATIO
        })
        .map(|(category, _)| category.clone())
        .collect();
    LimitStatus { warnings }
}

/// Expenses matching the filter, most recently added first.
pub(crate) fn filter_expenses<'a>(doc: &'a Document, filter: &ViewFilter) -> Vec<&'a Expense> {
    doc.expenses
        .iter()
        .rev()
        .filter(|e| {
            e.month_number()
                .is_some_and(|m| filter.month.matches(m))
                && filter.category.matches(&e.category)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BudgetStatus {
    Overspent,
    Low,
    Ok,
}

impl BudgetStatus {
    pub(crate) fn classify(remaining: Decimal) -> Self {
        if remaining < Decimal::ZERO {
            Self::Overspent
        } else if remaining <= LOW_BUDGET_THRESHOLD {
            Self::Low
        } else {
            Self::Ok
        }
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Overspent => "overspent",
            Self::Low => "low",
            Self::Ok => "ok",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The alert shown next to the budget. Overspending wins over limit warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Notification {
    Overspent,
    NearLimit,
}

pub(crate) fn notification(doc: &Document, month: Month) -> Option<Notification> {
    if BudgetStatus::classify(remaining_budget(doc, month)) == BudgetStatus::Overspent {
        Some(Notification::Overspent)
    } else if limit_status(doc, month).any_at_or_above_90_percent() {
        Some(Notification::NearLimit)
    } else {
        None
    }
}

/// Spending against the limit for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryLine {
    pub(crate) category: String,
    pub(crate) spent: Decimal,
    pub(crate) limit: Decimal,
}

/// Everything the summary view shows for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthSummary {
    pub(crate) month: Month,
    pub(crate) budget: Decimal,
    pub(crate) spent: Decimal,
    pub(crate) remaining: Decimal,
    pub(crate) status: BudgetStatus,
    pub(crate) categories: Vec<CategoryLine>,
    pub(crate) limit_status: LimitStatus,
    pub(crate) notification: Option<Notification>,
}

impl MonthSummary {
    pub(crate) fn build(doc: &Document, month: Month) -> Self {
        let budget = doc.monthly_budget_for(month);
        let spent = total_expenses_for_month(doc, month);
        let remaining = budget - spent;
        let limits: CategoryLimits = doc.limits_for_month(month);
        let by_category = spend_by_category(doc, month);

        let mut categories: Vec<CategoryLine> = limits
            .iter()
            .map(|(category, limit)| CategoryLine {
                category: category.clone(),
                spent: by_category.get(category).copied().unwrap_or(Decimal::ZERO),
                limit: *limit,
            })
            .collect();
        // Spending under labels that have no limit entry (legacy data).
        categories.extend(
            by_category
                .iter()
                .filter(|(category, _)| !limits.contains_key(*category))
                .map(|(category, spent)| CategoryLine {
                    category: category.clone(),
                    spent: *spent,
                    limit: Decimal::ZERO,
                }),
        );
        categories.sort_by(|a, b| b.spent.cmp(&a.spent).then(a.category.cmp(&b.category)));

        Self {
            month,
            budget,
            spent,
            remaining,
            status: BudgetStatus::classify(remaining),
            categories,
            limit_status: limit_status(doc, month),
            notification: notification(doc, month),
        }
    }
}

#[cfg(test)]
mod tests;
