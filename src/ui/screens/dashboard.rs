use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::analytics::{self, HealthRating};
use crate::store::{FinanceStore, MonthlyStats};
use crate::ui::app::App;
use crate::ui::theme::Palette;
use crate::ui::util::{format_amount, format_percent, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, store: &FinanceStore, p: &Palette) {
    let stats = store.monthly_stats(&app.current_month);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Summary cards
            Constraint::Length(3), // Health score
            Constraint::Min(8),    // Spending chart
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app, store, &stats, p);
    render_health(f, chunks[1], &stats, p);
    render_spending_chart(f, chunks[2], &stats, p);
}

fn render_summary_cards(
    f: &mut Frame,
    area: Rect,
    app: &App,
    store: &FinanceStore,
    stats: &MonthlyStats,
    p: &Palette,
) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let month_txns = app.month_transactions(store);
    let income_count = month_txns.iter().filter(|t| t.is_income()).count();
    let expense_count = month_txns.len() - income_count;
    let rate = analytics::savings_rate(stats);
    let sign_color = |v: Decimal| if v >= Decimal::ZERO { p.green } else { p.red };

    render_card(
        f,
        cards[0],
        "Income",
        format_amount(stats.total_income),
        p.green,
        format!("{income_count} txns"),
        p,
    );
    render_card(
        f,
        cards[1],
        "Expenses",
        format_amount(stats.total_expenses),
        p.red,
        format!("{expense_count} txns"),
        p,
    );
    render_card(
        f,
        cards[2],
        "Savings",
        format_amount(stats.savings),
        sign_color(stats.savings),
        "income - expenses".into(),
        p,
    );
    render_card(
        f,
        cards[3],
        "Savings Rate",
        format_percent(rate),
        sign_color(rate),
        "of income".into(),
        p,
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    color: Color,
    subtitle: String,
    p: &Palette,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.overlay))
        .title(Span::styled(format!(" {title} "), p.title_style()));

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(subtitle, p.dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_health(f: &mut Frame, area: Rect, stats: &MonthlyStats, p: &Palette) {
    let score = analytics::health_score(stats);
    let rating = HealthRating::from_score(score);
    let color = match rating {
        HealthRating::Excellent => p.green,
        HealthRating::Good => p.yellow,
        HealthRating::NeedsImprovement => p.red,
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(p.overlay))
                .title(Span::styled(" Financial Health ", p.title_style())),
        )
        .gauge_style(Style::default().fg(color).bg(p.surface))
        .percent(u16::from(score))
        .label(Span::styled(
            format!("{score}/100 {rating}"),
            Style::default().fg(p.text).add_modifier(Modifier::BOLD),
        ));

    f.render_widget(gauge, area);
}

fn render_spending_chart(f: &mut Frame, area: Rect, stats: &MonthlyStats, p: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.overlay))
        .title(Span::styled(" Spending by Category ", p.title_style()));

    if stats.category_breakdown.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No expenses for this month", p.dim_style())),
            Line::from(Span::styled(
                "Add one with :add expense <amount> <category> <date>",
                p.dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = analytics::top_categories(&stats.category_breakdown, 12)
        .into_iter()
        .map(|(name, amt)| {
            Bar::default()
                .value(amt.to_u64().unwrap_or(0))
                .text_value(format_amount(amt))
                .label(Line::from(truncate(&name, 12)))
                .style(Style::default().fg(p.accent))
                .value_style(
                    Style::default()
                        .fg(p.header_bg)
                        .bg(p.accent)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(1)
        .bar_style(Style::default().fg(p.accent))
        .label_style(p.normal_style());

    f.render_widget(chart, area);
}
