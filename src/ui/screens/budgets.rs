use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::analytics;
use crate::store::FinanceStore;
use crate::ui::app::App;
use crate::ui::theme::Palette;
use crate::ui::util::{format_amount, format_percent, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, store: &FinanceStore, p: &Palette) {
    let budgets = store.budgets();
    if budgets.is_empty() {
        render_empty(f, area, p);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3)])
        .split(area);

    let items: Vec<ListItem> = budgets
        .iter()
        .enumerate()
        .skip(app.budget_scroll)
        .take(chunks[0].height.saturating_sub(2) as usize)
        .map(|(i, budget)| {
            let percent = budget.percent_used();
            let ratio = percent
                .and_then(|pct| (pct / Decimal::ONE_HUNDRED).to_f64())
                .unwrap_or(0.0)
                .min(1.0);
            let color = p.status_color(budget.status());

            let style = if i == app.budget_index {
                p.selected_style()
            } else if i % 2 == 0 {
                p.alt_row_style()
            } else {
                p.normal_style()
            };

            let bar = create_progress_bar(ratio, 20);
            let display_name = truncate(&budget.category, 17);
            let percent_label = percent.map_or_else(|| "-".to_string(), format_percent);

            ListItem::new(Line::from(vec![
                Span::styled(format!("{display_name:<18}"), style),
                Span::styled(
                    format!(
                        "{:>11} / {:<11} ",
                        format_amount(budget.spent),
                        format_amount(budget.amount)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(bar, Style::default().fg(color)),
                Span::styled(
                    format!(" {percent_label:>7} "),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{} left  {}", format_amount(budget.remaining()), budget.status()),
                    p.dim_style(),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.overlay))
            .title(Span::styled(" Budgets ", p.title_style())),
    );
    f.render_widget(list, chunks[0]);

    render_totals(f, chunks[1], store, p);
}

fn render_totals(f: &mut Frame, area: Rect, store: &FinanceStore, p: &Palette) {
    let totals = analytics::budget_totals(store.budgets());
    let remaining_color = if totals.remaining >= Decimal::ZERO {
        p.green
    } else {
        p.red
    };

    let line = Line::from(vec![
        Span::styled(" Total budget ", p.dim_style()),
        Span::styled(format_amount(totals.total_budget), p.normal_style()),
        Span::styled("   Spent ", p.dim_style()),
        Span::styled(format_amount(totals.total_spent), p.expense_style()),
        Span::styled("   Remaining ", p.dim_style()),
        Span::styled(
            format_amount(totals.remaining),
            Style::default()
                .fg(remaining_color)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.overlay))
        .title(Span::styled(" Totals ", p.title_style()));
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_empty(f: &mut Frame, area: Rect, p: &Palette) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No budgets yet", p.dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Use :budget <category> <amount> to set a spending limit",
            p.dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.overlay))
            .title(Span::styled(" Budgets ", p.title_style())),
    );
    f.render_widget(msg, area);
}

fn create_progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width - filled;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::create_progress_bar;

    #[test]
    fn test_progress_bar_fill() {
        assert_eq!(create_progress_bar(0.0, 4), "[░░░░]");
        assert_eq!(create_progress_bar(0.5, 4), "[██░░]");
        assert_eq!(create_progress_bar(1.0, 4), "[████]");
    }

    #[test]
    fn test_progress_bar_never_overflows() {
        assert_eq!(create_progress_bar(3.0, 4), "[████]");
    }
}
