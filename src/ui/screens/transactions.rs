use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::store::FinanceStore;
use crate::ui::app::App;
use crate::ui::theme::Palette;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, store: &FinanceStore, p: &Palette) {
    let transactions = app.month_transactions(store);
    let title = Span::styled(
        format!(
            " Transactions for {} ({}) ",
            app.current_month,
            transactions.len()
        ),
        p.title_style(),
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.overlay))
        .title(title);

    if transactions.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No transactions for this month",
                p.dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :add <income|expense> <amount> <category> <YYYY-MM-DD>",
                p.dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Description", "Category", "Amount", "ID"]
        .iter()
        .map(|h| Cell::from(*h).style(p.header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = transactions
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let amount_style = if txn.is_income() {
                p.income_style()
            } else {
                p.expense_style()
            };
            let sign = if txn.is_income() { "+" } else { "-" };
            let amount_str = format!("{sign}{}", format_amount(txn.amount));

            let style = if i == app.transaction_index {
                p.selected_style()
            } else if i % 2 == 1 {
                p.alt_row_style()
            } else {
                p.normal_style()
            };

            Row::new(vec![
                Cell::from(format!("  {}", txn.date)),
                Cell::from(truncate(&txn.description, 40)),
                Cell::from(truncate(&txn.category, 18)),
                Cell::from(Span::styled(amount_str, amount_style)),
                Cell::from(Span::styled(txn.id.as_str(), p.dim_style())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(14),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
