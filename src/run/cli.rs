use anyhow::Result;
use chrono::Month;
use std::path::Path;

use super::{
    flag_value, has_flag, parse_amount, parse_id, parse_input_date, positionals, shellexpand,
};
use crate::db::Store;
use crate::error::LedgerError;
use crate::models::date::{today_iso, StoredDate};
use crate::models::{
    current_month, is_known_category, month_name, parse_month, resolve_category, CategoryLimits,
    MonthFilter, NewExpense, CATEGORIES,
};
use crate::summary::{CategoryFilter, MonthSummary, Notification, ViewFilter};
use crate::util::{format_amount, truncate};

pub(crate) fn as_cli(args: &[String], store: &Store) -> Result<()> {
    let Some(command) = args.get(1) else {
        return cli_summary(&[], store);
    };
    let rest = &args[2..];
    match command.as_str() {
        "add" | "a" => cli_add(rest, store),
        "edit" | "e" => cli_edit(rest, store),
        "select" => cli_select(rest, store),
        "delete" | "rm" => cli_delete(rest, store),
        "limits" | "l" => cli_limits(rest, store),
        "list" | "ls" => cli_list(rest, store),
        "summary" | "s" => cli_summary(rest, store),
        "export" => cli_export(rest, store),
        "categories" => {
            cli_categories();
            Ok(())
        }
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("pocketbook {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Pocketbook — local-only expense tracker");
    println!();
    println!("Usage: pocketbook [command]");
    println!();
    println!("Commands:");
    println!("  (none)                          Summary for the current month");
    println!("  add <amount> <category>         Record an expense");
    println!("    --desc <text>                 Description (default: \"No description\")");
    println!("    --date <YYYY-MM-DD>           Date (default: today)");
    println!("  select <id> | --clear           Choose the expense to edit");
    println!("  edit [id] <amount> <category>   Update an expense (default: selected)");
    println!("    --desc <text>, --date <YYYY-MM-DD>");
    println!("  delete [id]                     Delete an expense (default: selected)");
    println!("  limits <Month> [Cat=amount ...] Show or set category limits for a month");
    println!("  list                            List expenses, newest first");
    println!("    --month <Month|All>           Month filter (default: current)");
    println!("    --category <Category|All>     Category filter (default: All)");
    println!("  summary [Month]                 Budget, spending and alerts for a month");
    println!("  export [path]                   Export expenses to CSV");
    println!("    --month <Month|All>           Month to export (default: current)");
    println!("  categories                      List the expense categories");
    println!("  --help, -h                      Show this help");
    println!("  --version, -V                   Show version");
    println!();
    println!("Set POCKETBOOK_DB to use a different data file.");
}

fn month_arg(value: Option<&str>) -> Result<Month> {
    match value {
        Some(v) => parse_month(v).ok_or_else(|| anyhow::anyhow!("Unknown month: {v}")),
        None => Ok(current_month()),
    }
}

fn month_filter_arg(value: Option<&str>) -> Result<MonthFilter> {
    match value {
        Some(v) => MonthFilter::parse(v).ok_or_else(|| anyhow::anyhow!("Unknown month: {v}")),
        None => Ok(MonthFilter::Only(current_month())),
    }
}

fn category_arg(value: &str) -> String {
    let category = resolve_category(value);
    if !category.is_empty() && !is_known_category(&category) {
        println!("Note: \"{category}\" is not one of the standard categories");
    }
    category
}

fn cli_add(args: &[String], store: &Store) -> Result<()> {
    let (amount, category) = match positionals(args, &["--desc", "--date"]).as_slice() {
        [amount, category] => (parse_amount(amount)?, category_arg(category)),
        _ => anyhow::bail!(
            "Usage: pocketbook add <amount> <category> [--desc <text>] [--date <YYYY-MM-DD>]"
        ),
    };
    let date = match flag_value(args, "--date") {
        Some(d) => parse_input_date(d)?,
        None => parse_input_date(&today_iso())?,
    };
    let input = NewExpense {
        amount,
        category,
        description: flag_value(args, "--desc").unwrap_or_default().to_string(),
        date,
    };

    let id = store.update(|doc| Ok(doc.add_expense(input)?))?;
    println!("Expense added successfully! (id {id})");
    Ok(())
}

fn cli_select(args: &[String], store: &Store) -> Result<()> {
    if has_flag(args, "--clear") {
        store.clear_editing_expense()?;
        println!("Selection cleared");
        return Ok(());
    }
    let Some(raw) = args.first() else {
        match store.editing_expense()? {
            Some(id) => println!("Selected expense: {id}"),
            None => println!("No expense selected"),
        }
        return Ok(());
    };
    let id = parse_id(raw)?;
    if store.load()?.expense(id).is_none() {
        return Err(LedgerError::NotFound(id).into());
    }
    store.set_editing_expense(id)?;
    println!("Selected expense {id}");
    Ok(())
}

fn selected_or(arg: Option<&str>, store: &Store) -> Result<u64> {
    match arg {
        Some(raw) => parse_id(raw),
        None => store
            .editing_expense()?
            .ok_or_else(|| anyhow::anyhow!("No expense id given and none selected")),
    }
}

fn cli_edit(args: &[String], store: &Store) -> Result<()> {
    let pos = positionals(args, &["--desc", "--date"]);
    let (id, amount, category) = match pos.as_slice() {
        [id, amount, category] => (selected_or(Some(*id), store)?, *amount, *category),
        [amount, category] => (selected_or(None, store)?, *amount, *category),
        _ => anyhow::bail!(
            "Usage: pocketbook edit [id] <amount> <category> [--desc <text>] [--date <YYYY-MM-DD>]"
        ),
    };
    let amount = parse_amount(amount)?;
    let category = category_arg(category);
    let date = flag_value(args, "--date").map(parse_input_date).transpose()?;
    let description = flag_value(args, "--desc");

    store.update(|doc| {
        let existing = doc.expense(id).ok_or(LedgerError::NotFound(id))?;
        let input = NewExpense {
            amount,
            category,
            description: description
                .map(str::to_string)
                .unwrap_or_else(|| existing.description.clone()),
            date: date.unwrap_or_else(|| existing.date.clone()),
        };
        Ok(doc.update_expense(id, input)?)
    })?;
    store.clear_editing_expense()?;
    println!("Expense updated successfully!");
    Ok(())
}

fn cli_delete(args: &[String], store: &Store) -> Result<()> {
    let id = selected_or(positionals(args, &[]).first().copied(), store)?;
    let removed = store.update(|doc| Ok(doc.delete_expense(id)))?;
    if store.editing_expense()? == Some(id) {
        store.clear_editing_expense()?;
    }
    if removed {
        println!("Expense deleted successfully!");
    } else {
        println!("No expense with id {id}; nothing deleted");
    }
    Ok(())
}

fn cli_limits(args: &[String], store: &Store) -> Result<()> {
    let pos = positionals(args, &[]);
    let Some((month_raw, pairs)) = pos.split_first() else {
        anyhow::bail!("Usage: pocketbook limits <Month> [Category=amount ...]");
    };
    let month = month_arg(Some(month_raw))?;

    if pairs.is_empty() {
        let doc = store.load()?;
        print_limits(month, &doc.limits_for_month(month), doc.monthly_budget_for(month));
        return Ok(());
    }

    // Unnamed categories keep their current limit; the full set is submitted.
    let mut supplied: Vec<(String, &str)> = Vec::new();
    for pair in pairs {
        let (category, amount) = pair
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Expected Category=amount, got: {pair}"))?;
        supplied.push((category_arg(category), amount));
    }

    let total = store.update(|doc| {
        let mut limits: CategoryLimits = doc.limits_for_month(month);
        let mut unreadable = Vec::new();
        for (category, raw) in &supplied {
            match parse_amount(raw) {
                Ok(amount) => {
                    limits.insert(category.clone(), amount);
                }
                Err(_) => unreadable.push(category.clone()),
            }
        }
        if !unreadable.is_empty() {
            return Err(LedgerError::InvalidLimits(unreadable).into());
        }
        Ok(doc.set_category_limits(month, limits)?)
    })?;
    println!(
        "Budget and category limits for {} updated successfully! Total Budget: {}",
        month_name(month),
        format_amount(total)
    );
    Ok(())
}

fn print_limits(month: Month, limits: &CategoryLimits, budget: rust_decimal::Decimal) {
    println!("Category limits — {}", month_name(month));
    println!("{}", "─".repeat(40));
    for (category, limit) in limits {
        println!("  {category:<24} {:>12}", format_amount(*limit));
    }
    println!("{}", "─".repeat(40));
    println!("  {:<24} {:>12}", "Monthly budget", format_amount(budget));
}

fn cli_list(args: &[String], store: &Store) -> Result<()> {
    let month = month_filter_arg(flag_value(args, "--month"))?;
    let category = flag_value(args, "--category")
        .map(CategoryFilter::parse)
        .unwrap_or_default();
    let doc = store.load()?;
    let expenses = crate::summary::filter_expenses(&doc, &ViewFilter::new(month, category));

    if expenses.is_empty() {
        println!("No expenses found for this month and category.");
        return Ok(());
    }

    println!(
        "{:<5} {:<11} {:<15} {:>12}  Description",
        "ID", "Date", "Category", "Amount"
    );
    println!("{}", "─".repeat(70));
    for e in &expenses {
        let date = StoredDate::parse(&e.date)
            .map(|d| format!("{}/{:02}/{}", d.day, d.month, d.year))
            .unwrap_or_else(|_| e.date.clone());
        println!(
            "{:<5} {:<11} {:<15} {:>12}  {}",
            e.id,
            truncate(&date, 11),
            truncate(&e.category, 15),
            format_amount(e.amount),
            truncate(&e.description, 40),
        );
    }
    Ok(())
}

fn cli_summary(args: &[String], store: &Store) -> Result<()> {
    let month = month_arg(args.first().filter(|a| !a.starts_with('-')).map(|a| a.as_str()))?;
    let doc = store.load()?;
    let summary = MonthSummary::build(&doc, month);

    println!("Pocketbook — {}", month_name(summary.month));
    println!("{}", "─".repeat(40));
    println!("  Budget:     {}", format_amount(summary.budget));
    println!("  Spent:      {}", format_amount(summary.spent));
    println!(
        "  Remaining:  {} ({})",
        format_amount(summary.remaining),
        summary.status
    );
    match summary.notification {
        Some(Notification::Overspent) => println!("  Alert:      budget overspent"),
        Some(Notification::NearLimit) => println!(
            "  Alert:      at 90% of limit for {}",
            summary.limit_status.warnings.join(", ")
        ),
        None => {}
    }

    let lines: Vec<_> = summary
        .categories
        .iter()
        .filter(|c| !c.spent.is_zero() || !c.limit.is_zero())
        .collect();
    if !lines.is_empty() {
        println!();
        println!("Spending by Category:");
        for line in lines {
            println!(
                "  {:<24} {:>12} / {}",
                line.category,
                format_amount(line.spent),
                format_amount(line.limit)
            );
        }
    }
    Ok(())
}

fn cli_export(args: &[String], store: &Store) -> Result<()> {
    let month = month_filter_arg(flag_value(args, "--month"))?;
    let output_path = positionals(args, &["--month"])
        .first()
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/pocketbook-export-{month}.csv")
        });

    let doc = store.load()?;
    let expenses =
        crate::summary::filter_expenses(&doc, &ViewFilter::new(month, CategoryFilter::All));
    let count = crate::export::export_to_csv(Path::new(&output_path), &expenses)?;
    if count == 0 {
        println!("No expenses for {month}");
    } else {
        println!("Exported {count} expenses to {output_path}");
    }
    Ok(())
}

fn cli_categories() {
    for category in CATEGORIES {
        println!("{category}");
    }
}
