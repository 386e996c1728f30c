use anyhow::{bail, Result};
use chrono::{Datelike, Local};
use std::path::Path;

use crate::analytics::{self, HealthRating, TrendSummary};
use crate::export;
use crate::input;
use crate::session::Session;
use crate::ui::util::{format_amount, format_percent, truncate};

const DEFAULT_TREND_MONTHS: usize = 6;
const MAX_TREND_MONTHS: usize = 120;

pub(crate) fn as_cli(args: &[String], session: &mut Session) -> Result<()> {
    let Some(command) = args.get(1) else {
        print_usage();
        return Ok(());
    };
    let rest: Vec<&str> = args
        .get(2..)
        .unwrap_or_default()
        .iter()
        .map(String::as_str)
        .collect();

    match command.as_str() {
        "summary" | "s" => cli_summary(&rest, session),
        "list" | "ls" => cli_list(&rest, session),
        "add" => cli_add(&rest, session),
        "edit" => cli_edit(&rest, session),
        "delete" | "rm" => cli_delete(&rest, session),
        "budget" => cli_budget(&rest, session),
        "budgets" => cli_budgets(session),
        "trend" => cli_trend(&rest, session),
        "theme" => {
            session.toggle_theme();
            println!("Theme: {}", session.store().theme());
            Ok(())
        }
        "export" => cli_export(&rest, session),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("finguard {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("FinGuard - local-only personal finance dashboard");
    println!();
    println!("Usage: finguard [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary [YYYY-MM]             Monthly income, expenses, savings and health score");
    println!("  list [YYYY-MM]                List transactions (all, or one month)");
    println!("  {}", input::ADD_USAGE);
    println!("  {}", input::EDIT_USAGE);
    println!("  delete <id>                   Delete a transaction");
    println!("  {}", input::BUDGET_USAGE);
    println!("  budgets                       Show budgets with spending status");
    println!("  trend [months]                Income/expense trend (default: 6 months)");
    println!("  theme                         Toggle light/dark theme");
    println!("  {}", input::EXPORT_USAGE);
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn current_month() -> String {
    Local::now().format("%Y-%m").to_string()
}

/// First positional argument as a month key, if any.
fn month_arg(args: &[&str]) -> Result<Option<String>> {
    match args.first().filter(|a| !a.starts_with('-')) {
        Some(raw) => Ok(Some(input::parse_month(raw, Local::now().year())?)),
        None => Ok(None),
    }
}

fn cli_summary(args: &[&str], session: &Session) -> Result<()> {
    let month = month_arg(args)?.unwrap_or_else(current_month);
    let stats = session.store().monthly_stats(&month);
    let rate = analytics::savings_rate(&stats);
    let score = analytics::health_score(&stats);

    println!("FinGuard - {month}");
    println!("{}", "─".repeat(40));
    println!("  Income:        {}", format_amount(stats.total_income));
    println!("  Expenses:      {}", format_amount(stats.total_expenses));
    println!("  Savings:       {}", format_amount(stats.savings));
    println!("  Savings Rate:  {}", format_percent(rate));
    println!(
        "  Health Score:  {score}/100 ({})",
        HealthRating::from_score(score)
    );

    if !stats.category_breakdown.is_empty() {
        println!();
        println!("Spending by Category:");
        let ranked = analytics::top_categories(&stats.category_breakdown, usize::MAX);
        for (name, amount) in &ranked {
            println!("  {:<24} {}", truncate(name, 24), format_amount(*amount));
        }
    }

    Ok(())
}

fn cli_list(args: &[&str], session: &Session) -> Result<()> {
    let month = month_arg(args)?;
    let store = session.store();
    let txns: Vec<_> = match &month {
        Some(m) => store.transactions_in_month(m).collect(),
        None => store.transactions().iter().collect(),
    };

    if txns.is_empty() {
        match month {
            Some(m) => println!("No transactions for {m}"),
            None => println!("No transactions"),
        }
        return Ok(());
    }

    println!(
        "{:<14} {:<11} {:<8} {:<16} {:>12}  Description",
        "ID", "Date", "Type", "Category", "Amount"
    );
    println!("{}", "─".repeat(80));
    for txn in &txns {
        println!(
            "{:<14} {:<11} {:<8} {:<16} {:>12}  {}",
            txn.id,
            txn.date,
            txn.kind,
            truncate(&txn.category, 16),
            format_amount(txn.signed_amount()),
            txn.description,
        );
    }
    Ok(())
}

fn cli_add(args: &[&str], session: &mut Session) -> Result<()> {
    let new = input::parse_new_transaction(args)?;
    let category = new.category.clone();
    let is_expense = new.kind == crate::models::TransactionKind::Expense;
    let id = session.add_transaction(new);
    println!("Added transaction {id}");

    if is_expense {
        if let Some(budget) = session.store().budget(&category) {
            println!(
                "  {category} budget: {} of {} spent",
                format_amount(budget.spent),
                format_amount(budget.amount)
            );
        }
    }
    Ok(())
}

fn cli_edit(args: &[&str], session: &mut Session) -> Result<()> {
    let [id, flags @ ..] = args else {
        bail!("Usage: finguard {}", input::EDIT_USAGE);
    };
    if session.store().transaction(id).is_none() {
        bail!("Transaction not found: {id}");
    }
    let patch = input::parse_patch(flags)?;
    session.update_transaction(id, patch);
    println!("Updated transaction {id}");
    Ok(())
}

fn cli_delete(args: &[&str], session: &mut Session) -> Result<()> {
    let [id] = args else {
        bail!("Usage: finguard delete <id>");
    };
    let Some(txn) = session.store().transaction(id) else {
        bail!("Transaction not found: {id}");
    };
    let label = format!("{} {} {}", txn.date, txn.category, format_amount(txn.amount));
    session.delete_transaction(id);
    println!("Deleted: {label}");
    Ok(())
}

fn cli_budget(args: &[&str], session: &mut Session) -> Result<()> {
    let (category, amount) = input::parse_budget(&args.join(" "))?;
    session.set_budget(&category, amount);
    println!("Budget set: {category} = {}", format_amount(amount));
    Ok(())
}

fn cli_budgets(session: &Session) -> Result<()> {
    let budgets = session.store().budgets();
    if budgets.is_empty() {
        println!("No budgets");
        return Ok(());
    }

    println!(
        "{:<18} {:>12} {:>12} {:>12} {:>7}  Status",
        "Category", "Budget", "Spent", "Remaining", "Used"
    );
    println!("{}", "─".repeat(78));
    for budget in budgets {
        let used = budget
            .percent_used()
            .map_or_else(|| "-".to_string(), format_percent);
        println!(
            "{:<18} {:>12} {:>12} {:>12} {:>7}  {}",
            truncate(&budget.category, 18),
            format_amount(budget.amount),
            format_amount(budget.spent),
            format_amount(budget.remaining()),
            used,
            budget.status(),
        );
    }

    let totals = analytics::budget_totals(budgets);
    println!("{}", "─".repeat(78));
    println!(
        "{:<18} {:>12} {:>12} {:>12}",
        "Total",
        format_amount(totals.total_budget),
        format_amount(totals.total_spent),
        format_amount(totals.remaining),
    );
    Ok(())
}

fn cli_trend(args: &[&str], session: &Session) -> Result<()> {
    let count = match args.first() {
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) if (1..=MAX_TREND_MONTHS).contains(&n) => n,
            _ => bail!("Invalid month count: {raw}. Expected 1-{MAX_TREND_MONTHS}"),
        },
        None => DEFAULT_TREND_MONTHS,
    };

    let months = analytics::recent_months(Local::now().date_naive(), count);
    let points = analytics::monthly_trend(session.store(), &months);

    println!(
        "{:<9} {:>12} {:>12} {:>12}",
        "Month", "Income", "Expenses", "Savings"
    );
    println!("{}", "─".repeat(48));
    for point in &points {
        println!(
            "{:<9} {:>12} {:>12} {:>12}",
            point.month,
            format_amount(point.income),
            format_amount(point.expenses),
            format_amount(point.savings),
        );
    }

    let summary = TrendSummary::from_points(&points);
    println!("{}", "─".repeat(48));
    println!(
        "{:<9} {:>12} {:>12} {:>12}",
        "Total",
        format_amount(summary.total_income),
        format_amount(summary.total_expenses),
        format_amount(summary.total_savings),
    );
    println!(
        "Average savings rate: {}",
        format_percent(summary.avg_savings_rate)
    );
    Ok(())
}

fn cli_export(args: &[&str], session: &Session) -> Result<()> {
    let (path, month) = input::parse_export_args(args, Local::now().year())?;
    let output_path = match path {
        Some(p) => export::shellexpand(&p),
        None => export::default_export_path(month.as_deref().unwrap_or("all")),
    };

    let store = session.store();
    let count = match &month {
        Some(m) => export::export_to_file(Path::new(&output_path), store.transactions_in_month(m))?,
        None => export::export_to_file(Path::new(&output_path), store.transactions())?,
    };

    match (count, month) {
        (0, Some(m)) => println!("No transactions for {m}"),
        (0, None) => println!("No transactions to export"),
        _ => println!("Exported {count} transactions to {output_path}"),
    }
    Ok(())
}
