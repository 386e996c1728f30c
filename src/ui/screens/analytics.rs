use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::analytics::{self, MonthPoint, TrendSummary};
use crate::store::FinanceStore;
use crate::ui::app::App;
use crate::ui::theme::Palette;
use crate::ui::util::{format_amount, format_percent, truncate};

const TREND_MONTHS: usize = 6;
const TOP_CATEGORIES: usize = 5;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, store: &FinanceStore, p: &Palette) {
    let months = app
        .month_start()
        .map(|anchor| analytics::recent_months(anchor, TREND_MONTHS))
        .unwrap_or_default();
    let points = analytics::monthly_trend(store, &months);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(9)])
        .split(area);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    render_trend_chart(f, rows[0], &points, p);
    render_summary(f, bottom[0], &points, p);
    render_top_categories(f, bottom[1], app, store, p);
}

fn block<'a>(title: &'a str, p: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.overlay))
        .title(Span::styled(title, p.title_style()))
}

fn render_trend_chart(f: &mut Frame, area: Rect, points: &[MonthPoint], p: &Palette) {
    let groups: Vec<BarGroup> = points
        .iter()
        .map(|point| {
            let bars = [
                Bar::default()
                    .value(point.income.to_u64().unwrap_or(0))
                    .text_value(String::new())
                    .style(Style::default().fg(p.green)),
                Bar::default()
                    .value(point.expenses.to_u64().unwrap_or(0))
                    .text_value(String::new())
                    .style(Style::default().fg(p.red)),
            ];
            BarGroup::default()
                .label(Line::from(point.month.clone()))
                .bars(&bars)
        })
        .collect();

    let title = format!(" {TREND_MONTHS}-Month Trend (income / expenses) ");
    let mut chart = BarChart::default()
        .block(block(&title, p))
        .bar_width(4)
        .bar_gap(0)
        .group_gap(3)
        .label_style(p.dim_style());
    for group in groups {
        chart = chart.data(group);
    }

    f.render_widget(chart, area);
}

fn render_summary(f: &mut Frame, area: Rect, points: &[MonthPoint], p: &Palette) {
    let summary = TrendSummary::from_points(points);
    let savings_color = if summary.total_savings >= Decimal::ZERO {
        p.green
    } else {
        p.red
    };

    let row = |label: &'static str, value: String, style: Style| {
        Line::from(vec![
            Span::styled(format!(" {label:<22}"), p.dim_style()),
            Span::styled(value, style),
        ])
    };

    let lines = vec![
        Line::from(""),
        row(
            "Total income",
            format_amount(summary.total_income),
            p.income_style(),
        ),
        row(
            "Total expenses",
            format_amount(summary.total_expenses),
            p.expense_style(),
        ),
        row(
            "Total savings",
            format_amount(summary.total_savings),
            Style::default().fg(savings_color),
        ),
        row(
            "Average savings rate",
            format_percent(summary.avg_savings_rate),
            Style::default()
                .fg(savings_color)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let title = format!(" Last {} Months ", points.len());
    f.render_widget(Paragraph::new(lines).block(block(&title, p)), area);
}

fn render_top_categories(
    f: &mut Frame,
    area: Rect,
    app: &App,
    store: &FinanceStore,
    p: &Palette,
) {
    let stats = store.monthly_stats(&app.current_month);
    let top = analytics::top_categories(&stats.category_breakdown, TOP_CATEGORIES);
    let title = format!(" Top Categories {} ", app.current_month);

    if top.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No expenses for this month", p.dim_style())),
        ])
        .centered()
        .block(block(&title, p));
        f.render_widget(msg, area);
        return;
    }

    let mut lines = vec![Line::from("")];
    for (rank, (name, amount)) in top.iter().enumerate() {
        let share = amount
            .checked_div(stats.total_expenses)
            .map(|ratio| format_percent(ratio.saturating_mul(Decimal::ONE_HUNDRED)))
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(format!(" {}. ", rank + 1), p.dim_style()),
            Span::styled(format!("{:<18}", truncate(name, 18)), p.normal_style()),
            Span::styled(format!("{:>12}", format_amount(*amount)), p.expense_style()),
            Span::styled(format!(" {share:>7}"), p.dim_style()),
        ]));
    }

    f.render_widget(Paragraph::new(lines).block(block(&title, p)), area);
}
