use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{bail, Context};
use chrono::{Datelike, Local, Months};

use super::app::{App, InputMode, PendingAction, Screen};
use super::util::format_amount;
use crate::export;
use crate::input;
use crate::session::Session;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Session) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit FinGuard", cmd_quit, r);
    register_command!("quit", "Quit FinGuard", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("a", "Go to Analytics", cmd_analytics, r);
    register_command!("analytics", "Go to Analytics", cmd_analytics, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Set month (e.g. :month 2024-01)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 2024-01)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "add",
        "Add transaction (e.g. :add expense 12.50 Food 2024-01-15 Lunch)",
        cmd_add,
        r
    );
    register_command!(
        "edit",
        "Edit selected or given transaction (e.g. :edit --amount 40)",
        cmd_edit,
        r
    );
    register_command!(
        "delete",
        "Delete selected or given transaction",
        cmd_delete,
        r
    );
    register_command!(
        "delete-txn",
        "Delete selected or given transaction",
        cmd_delete,
        r
    );
    register_command!(
        "budget",
        "Set budget (e.g. :budget Food 500)",
        cmd_budget,
        r
    );
    register_command!("theme", "Toggle light/dark theme", cmd_theme, r);
    register_command!(
        "export",
        "Export month to CSV (e.g. :export ~/january.csv)",
        cmd_export,
        r
    );

    r
});

/// Runs one `:` command line. Failures are shown in the status bar and never
/// leave the command line.
pub(crate) fn handle_command(input: &str, app: &mut App, session: &mut Session) {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        if let Err(e) = (cmd.run)(args, app, session) {
            app.set_status(format!("{e}"));
        }
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    Ok(())
}

fn cmd_analytics(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Analytics;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let month = if args.is_empty() {
        Local::now().format("%Y-%m").to_string()
    } else {
        let year = app.month_start().map_or_else(|| Local::now().year(), |d| d.year());
        input::parse_month(args, year)?
    };
    app.set_status(format!("Month: {month}"));
    app.set_month(month);
    app.clamp_selection(session.store());
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    advance_month(app, session, 1)
}

fn cmd_prev_month(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    advance_month(app, session, -1)
}

fn advance_month(app: &mut App, session: &mut Session, delta: i32) -> anyhow::Result<()> {
    let Some(date) = app.month_start() else {
        bail!("Invalid month: {}", app.current_month);
    };
    let new_date = if delta > 0 {
        date.checked_add_months(Months::new(1))
    } else {
        date.checked_sub_months(Months::new(1))
    };

    if let Some(d) = new_date {
        let m = d.format("%Y-%m").to_string();
        app.set_status(format!("Month: {m}"));
        app.set_month(m);
        app.clamp_selection(session.store());
    }
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let words: Vec<&str> = args.split_whitespace().collect();
    let new = input::parse_new_transaction(&words)?;
    let summary = format!("{} {} {}", new.kind, new.category, format_amount(new.amount));
    let off_month = !new.date.starts_with(&app.current_month);
    let id = session.add_transaction(new);

    if off_month {
        app.set_status(format!("Added {summary} (id {id}, outside {})", app.current_month));
    } else {
        app.set_status(format!("Added {summary} (id {id})"));
    }
    Ok(())
}

/// `[id] --flag value...`. Without an id the highlighted transaction is used.
fn cmd_edit(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let words: Vec<&str> = args.split_whitespace().collect();
    let (id, flags) = match words.split_first() {
        Some((first, rest)) if !first.starts_with("--") => (first.to_string(), rest),
        _ => (selected_id(app, session)?, words.as_slice()),
    };
    if session.store().transaction(&id).is_none() {
        bail!("Transaction not found: {id}");
    }
    let patch = input::parse_patch(flags)?;
    session.update_transaction(&id, patch);
    app.clamp_selection(session.store());
    app.set_status(format!("Updated transaction {id}"));
    Ok(())
}

fn cmd_delete(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let id = if args.is_empty() {
        selected_id(app, session)?
    } else {
        args.to_string()
    };
    let Some(txn) = session.store().transaction(&id) else {
        bail!("Transaction not found: {id}");
    };

    let description = if txn.description.is_empty() {
        txn.category.clone()
    } else {
        txn.description.clone()
    };
    app.confirm_message = format!(
        "Delete '{description}' ({})?",
        format_amount(txn.amount)
    );
    app.pending_action = Some(PendingAction::DeleteTransaction { id, description });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn selected_id(app: &App, session: &Session) -> anyhow::Result<String> {
    if app.screen != Screen::Transactions {
        bail!("Navigate to Transactions first, or pass a transaction id");
    }
    app.selected_transaction(session.store())
        .map(|t| t.id.clone())
        .context("No transaction selected")
}

fn cmd_budget(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let (category, amount) = input::parse_budget(args)?;
    session.set_budget(&category, amount);
    app.set_status(format!("Budget set: {category} = {}", format_amount(amount)));
    Ok(())
}

fn cmd_theme(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    session.toggle_theme();
    app.set_status(format!("Theme: {}", session.store().theme()));
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        export::default_export_path(&app.current_month)
    } else {
        export::shellexpand(args)
    };

    let txns = session.store().transactions_in_month(&app.current_month);
    let count = export::export_to_file(Path::new(&path), txns)?;
    if count == 0 {
        app.set_status(format!("No transactions for {}", app.current_month));
    } else {
        app.set_status(format!("Exported {count} transactions to {path}"));
    }
    Ok(())
}
