#![allow(clippy::unwrap_used)]

use chrono::Month;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{month_name, CategoryLimits, Document, MonthFilter, NewExpense};

fn all_months() -> impl Iterator<Item = Month> {
    (1..=12u8).map(|n| Month::try_from(n).unwrap())
}

fn limits(pairs: &[(&str, Decimal)]) -> CategoryLimits {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn add(doc: &mut Document, amount: Decimal, category: &str, date: &str) -> u64 {
    doc.add_expense(NewExpense::new(amount, category, "", date))
        .unwrap()
}

fn sample() -> Document {
    let mut doc = Document::default();
    add(&mut doc, dec!(25), "Eat-out", "15/03/2024");
    add(&mut doc, dec!(10.50), "Phone", "02/03/2024");
    add(&mut doc, dec!(7), "Eat-out", "20/03/2023");
    add(&mut doc, dec!(40), "Medical", "01/04/2024");
    add(&mut doc, dec!(99), "Eat-out", "2024-03-15");
    doc
}

// ── Totals ────────────────────────────────────────────────────

#[test]
fn test_total_for_month_ignores_year() {
    let doc = sample();
    // Month matching looks at the month component only.
    assert_eq!(total_expenses_for_month(&doc, Month::March), dec!(42.50));
    assert_eq!(total_expenses_for_month(&doc, Month::April), dec!(40));
    assert_eq!(total_expenses_for_month(&doc, Month::May), dec!(0));
}

#[test]
fn test_malformed_date_excluded_but_kept() {
    let doc = sample();
    assert_eq!(doc.expenses.len(), 5);
    assert_eq!(doc.expenses[4].date, "2024-03-15");

    for month in all_months() {
        let filter = ViewFilter::new(MonthFilter::Only(month), CategoryFilter::All);
        let filtered = filter_expenses(&doc, &filter);
        assert!(filtered.iter().all(|e| e.date != "2024-03-15"));
    }
    let all = filter_expenses(&doc, &ViewFilter::all());
    assert_eq!(all.len(), 4);
    assert!(all.iter().all(|e| e.amount != dec!(99)));
}

#[test]
fn test_remaining_budget_identity() {
    let mut doc = sample();
    doc.set_category_limits(Month::March, limits(&[("Eat-out", dec!(60))]))
        .unwrap();
    for month in all_months() {
        let name = month_name(month);
        let budget = doc.monthly_budget.get(name).copied().unwrap_or_default();
        assert_eq!(
            remaining_budget(&doc, month),
            budget - total_expenses_for_month(&doc, month),
            "identity failed for {name}"
        );
    }
    assert_eq!(remaining_budget(&doc, Month::March), dec!(17.50));
    assert_eq!(remaining_budget(&doc, Month::April), dec!(-40));
    assert_eq!(remaining_budget(&doc, Month::June), dec!(0));
}

#[test]
fn test_low_budget_scenario() {
    let mut doc = Document::default();
    add(&mut doc, dec!(25), "Eat-out", "15/03/2024");
    doc.set_category_limits(
        Month::March,
        limits(&[("Eat-out", dec!(60)), ("Phone", dec!(40))]),
    )
    .unwrap();
    assert_eq!(doc.monthly_budget["March"], dec!(100));

    assert_eq!(total_expenses_for_month(&doc, Month::March), dec!(25));
    let remaining = remaining_budget(&doc, Month::March);
    assert_eq!(remaining, dec!(75));
    assert_eq!(BudgetStatus::classify(remaining), BudgetStatus::Low);
}

#[test]
fn test_spend_by_category() {
    let doc = sample();
    let march = spend_by_category(&doc, Month::March);
    assert_eq!(march.len(), 2);
    assert_eq!(march["Eat-out"], dec!(32));
    assert_eq!(march["Phone"], dec!(10.50));
    assert!(spend_by_category(&doc, Month::May).is_empty());
}

// ── Limit status ──────────────────────────────────────────────

#[test]
fn test_limit_status_threshold_is_inclusive() {
    let mut doc = Document::default();
    add(&mut doc, dec!(90), "Phone", "05/06/2024");
    doc.set_category_limits(Month::June, limits(&[("Phone", dec!(100))]))
        .unwrap();
    let status = limit_status(&doc, Month::June);
    assert!(status.any_at_or_above_90_percent());
    assert_eq!(status.warnings, vec!["Phone".to_string()]);
}

#[test]
fn test_limit_status_below_threshold() {
    let mut doc = Document::default();
    add(&mut doc, dec!(89.99), "Phone", "05/06/2024");
    doc.set_category_limits(Month::June, limits(&[("Phone", dec!(100))]))
        .unwrap();
    assert!(!limit_status(&doc, Month::June).any_at_or_above_90_percent());
}

#[test]
fn test_limit_status_zero_limit_never_warns() {
    let mut doc = Document::default();
    add(&mut doc, dec!(500), "Phone", "05/06/2024");
    assert!(!limit_status(&doc, Month::June).any_at_or_above_90_percent());

    doc.set_category_limits(Month::June, limits(&[("Phone", dec!(0))]))
        .unwrap();
    assert!(!limit_status(&doc, Month::June).any_at_or_above_90_percent());
}

#[test]
fn test_limit_status_other_month_spending_ignored() {
    let mut doc = Document::default();
    add(&mut doc, dec!(500), "Phone", "05/07/2024");
    doc.set_category_limits(Month::June, limits(&[("Phone", dec!(100))]))
        .unwrap();
    assert!(!limit_status(&doc, Month::June).any_at_or_above_90_percent());
}

#[test]
fn test_limit_status_multiple_warnings() {
    let mut doc = Document::default();
    add(&mut doc, dec!(10), "Phone", "05/06/2024");
    add(&mut doc, dec!(60), "Medical", "05/06/2024");
    add(&mut doc, dec!(1), "Savings", "05/06/2024");
    doc.set_category_limits(
        Month::June,
        limits(&[
            ("Phone", dec!(10)),
            ("Medical", dec!(50)),
            ("Savings", dec!(100)),
        ]),
    )
    .unwrap();
    let status = limit_status(&doc, Month::June);
    assert_eq!(
        status.warnings,
        vec!["Medical".to_string(), "Phone".to_string()]
    );
}

// ── Filtering ─────────────────────────────────────────────────

#[test]
fn test_filter_newest_first() {
    let doc = sample();
    let all = filter_expenses(&doc, &ViewFilter::all());
    let ids: Vec<u64> = all.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![4, 3, 2, 1]);
    // Stored order is untouched.
    assert_eq!(doc.expenses[0].id, 1);
}

#[test]
fn test_filter_by_month_and_category() {
    let doc = sample();
    let march_eatout = filter_expenses(
        &doc,
        &ViewFilter::new(
            MonthFilter::Only(Month::March),
            CategoryFilter::parse("eat-out"),
        ),
    );
    let ids: Vec<u64> = march_eatout.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![3, 1]);

    let phone_any_month = filter_expenses(
        &doc,
        &ViewFilter::new(MonthFilter::All, CategoryFilter::Only("Phone".into())),
    );
    assert_eq!(phone_any_month.len(), 1);

    let nothing = filter_expenses(
        &doc,
        &ViewFilter::new(MonthFilter::Only(Month::December), CategoryFilter::All),
    );
    assert!(nothing.is_empty());
}

#[test]
fn test_filter_after_add_has_one_more() {
    let mut doc = sample();
    let before = filter_expenses(&doc, &ViewFilter::all()).len();
    let id = add(&mut doc, dec!(12.34), "Clothes", "09/09/2024");
    let after = filter_expenses(&doc, &ViewFilter::all());
    assert_eq!(after.len(), before + 1);
    let newest = after[0];
    assert_eq!(newest.id, id);
    assert_eq!(newest.amount, dec!(12.34));
    assert_eq!(newest.category, "Clothes");
    assert_eq!(after.iter().filter(|e| e.id == id).count(), 1);
}

#[test]
fn test_category_filter_parse() {
    assert_eq!(CategoryFilter::parse("All"), CategoryFilter::All);
    assert_eq!(
        CategoryFilter::parse("work out"),
        CategoryFilter::Only("Work Out".into())
    );
    assert_eq!(
        CategoryFilter::parse("Groceries"),
        CategoryFilter::Only("Groceries".into())
    );
}

// ── Budget status ─────────────────────────────────────────────

#[test]
fn test_budget_status_boundaries() {
    assert_eq!(BudgetStatus::classify(dec!(-0.01)), BudgetStatus::Overspent);
    assert_eq!(BudgetStatus::classify(dec!(0)), BudgetStatus::Low);
    assert_eq!(BudgetStatus::classify(dec!(100)), BudgetStatus::Low);
    assert_eq!(BudgetStatus::classify(dec!(100.01)), BudgetStatus::Ok);
    assert_eq!(BudgetStatus::Overspent.to_string(), "overspent");
}

// ── Notification ──────────────────────────────────────────────

#[test]
fn test_notification_overspent_wins() {
    let mut doc = Document::default();
    add(&mut doc, dec!(120), "Phone", "05/06/2024");
    doc.set_category_limits(Month::June, limits(&[("Phone", dec!(100))]))
        .unwrap();
    assert_eq!(
        notification(&doc, Month::June),
        Some(Notification::Overspent)
    );
}

#[test]
fn test_notification_near_limit() {
    let mut doc = Document::default();
    add(&mut doc, dec!(95), "Phone", "05/06/2024");
    doc.set_category_limits(
        Month::June,
        limits(&[("Phone", dec!(100)), ("Savings", dec!(400))]),
    )
    .unwrap();
    assert_eq!(
        notification(&doc, Month::June),
        Some(Notification::NearLimit)
    );
}

#[test]
fn test_notification_none() {
    let mut doc = Document::default();
    add(&mut doc, dec!(5), "Phone", "05/06/2024");
    doc.set_category_limits(Month::June, limits(&[("Phone", dec!(100))]))
        .unwrap();
    assert_eq!(notification(&doc, Month::June), None);
}

// ── MonthSummary ──────────────────────────────────────────────

#[test]
fn test_month_summary() {
    let mut doc = sample();
    add(&mut doc, dec!(3), "Legacy", "11/03/2024");
    doc.set_category_limits(
        Month::March,
        limits(&[("Eat-out", dec!(30)), ("Phone", dec!(200))]),
    )
    .unwrap();

    let summary = MonthSummary::build(&doc, Month::March);
    assert_eq!(summary.budget, dec!(230));
    assert_eq!(summary.spent, dec!(45.50));
    assert_eq!(summary.remaining, dec!(184.50));
    assert_eq!(summary.status, BudgetStatus::Ok);
    assert_eq!(summary.notification, Some(Notification::NearLimit));
    assert_eq!(summary.limit_status.warnings, vec!["Eat-out".to_string()]);

    // Ten fixed categories plus the legacy label, biggest spend first.
    assert_eq!(summary.categories.len(), 11);
    assert_eq!(summary.categories[0].category, "Eat-out");
    assert_eq!(summary.categories[0].spent, dec!(32));
    assert_eq!(summary.categories[0].limit, dec!(30));
    let legacy = summary
        .categories
        .iter()
        .find(|c| c.category == "Legacy")
        .unwrap();
    assert_eq!(legacy.limit, dec!(0));
}
