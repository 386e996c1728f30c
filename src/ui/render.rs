use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::screens;
use super::theme::Palette;
use crate::store::FinanceStore;

pub(crate) fn render(f: &mut Frame, app: &App, store: &FinanceStore) {
    let p = Palette::for_theme(store.theme());
    let full = f.area();

    // Paint the whole frame so the light palette does not sit on a dark terminal
    f.render_widget(Block::default().style(Style::default().bg(p.command_bg)), full);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(full);

    render_tab_bar(f, chunks[0], app, p);
    render_screen(f, chunks[1], app, store, p);
    render_status_bar(f, chunks[2], app, store, p);
    render_command_bar(f, chunks[3], app, p);

    if app.show_help {
        render_help_overlay(f, full, p);
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App, p: &Palette) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), p.dim_style()),
                    Span::styled(
                        format!("{s}"),
                        Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(format!("{num}:{s}"), p.dim_style()))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(p.overlay)))
        .style(Style::default().bg(p.header_bg));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App, store: &FinanceStore, p: &Palette) {
    match app.screen {
        Screen::Dashboard => screens::dashboard::render(f, area, app, store, p),
        Screen::Transactions => screens::transactions::render(f, area, app, store, p),
        Screen::Budgets => screens::budgets::render(f, area, app, store, p),
        Screen::Analytics => screens::analytics::render(f, area, app, store, p),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App, store: &FinanceStore, p: &Palette) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => p.accent,
        InputMode::Command => p.green,
        InputMode::Confirm => p.red,
    };
    let mode_style = Style::default()
        .fg(p.header_bg)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let month_count = store.transactions_in_month(&app.current_month).count();
    let info = format!(
        " {} | {} | {month_count} txns | {} ",
        app.screen,
        app.current_month,
        store.theme()
    );

    let right = match app.screen {
        Screen::Dashboard => " H/L month | T theme | ? help ",
        Screen::Transactions => " D delete | :edit | :add | ? help ",
        Screen::Budgets => " :budget <category> <amount> | ? help ",
        Screen::Analytics => " H/L month | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, p.status_bar_style()),
        Span::styled(" ".repeat(pad), p.status_bar_style()),
        Span::styled(right, p.status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App, p: &Palette) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(p.accent)),
                Span::styled(&app.command_input, p.command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(p.yellow)),
                Span::styled(" [y/N] ", Style::default().fg(p.red)),
            ]),
            None,
        ),
        InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, ? for help",
                    p.dim_style(),
                ))
            } else {
                Line::from(Span::styled(&app.status_message, p.command_bar_style()))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(p.command_bg));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_help_overlay(f: &mut Frame, area: Rect, p: &Palette) {
    let heading = Style::default().fg(p.yellow).add_modifier(Modifier::BOLD);
    let mut help_text = vec![
        Line::from(Span::styled(
            " FinGuard Help ",
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", heading)),
        Line::from(Span::styled(
            "  j/k or Up/Down   Move cursor           1-4        Switch tabs",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            "  Tab/Shift-Tab    Cycle tabs            g/G        Top/Bottom",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            "  H/L              Prev/Next month       Ctrl-d/u   Page Down/Up",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            "  T                Toggle theme          Ctrl-q     Quit",
            p.normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Actions", heading)),
        Line::from(Span::styled(
            "  :               Command mode           Esc        Clear status",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            "  D (Transactions) Delete transaction",
            p.normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Commands", heading)),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 2 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<14} {desc}"),
            p.normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        p.dim_style(),
    )));

    // Center the popup, clamped to terminal height
    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 80.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.accent))
            .style(Style::default().bg(p.header_bg)),
    );
    f.render_widget(help, popup_area);
}
