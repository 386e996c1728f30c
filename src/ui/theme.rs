use ratatui::style::{Color, Modifier, Style};

use crate::models::{BudgetStatus, Theme};

/// Colours for one theme. Screens take the palette from the store's theme
/// on every frame, so a toggle shows up immediately.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Palette {
    pub(crate) header_bg: Color,
    pub(crate) header_fg: Color,
    pub(crate) accent: Color,
    pub(crate) green: Color,
    pub(crate) red: Color,
    pub(crate) yellow: Color,
    pub(crate) surface: Color,
    pub(crate) text: Color,
    pub(crate) text_dim: Color,
    pub(crate) overlay: Color,
    pub(crate) command_bg: Color,
}

const DARK: Palette = Palette {
    header_bg: Color::Rgb(30, 30, 46),
    header_fg: Color::Rgb(205, 214, 244),
    accent: Color::Rgb(137, 180, 250),
    green: Color::Rgb(166, 227, 161),
    red: Color::Rgb(243, 139, 168),
    yellow: Color::Rgb(249, 226, 175),
    surface: Color::Rgb(49, 50, 68),
    text: Color::Rgb(205, 214, 244),
    text_dim: Color::Rgb(127, 132, 156),
    overlay: Color::Rgb(69, 71, 90),
    command_bg: Color::Rgb(24, 24, 37),
};

const LIGHT: Palette = Palette {
    header_bg: Color::Rgb(220, 224, 232),
    header_fg: Color::Rgb(76, 79, 105),
    accent: Color::Rgb(30, 102, 245),
    green: Color::Rgb(64, 160, 43),
    red: Color::Rgb(210, 15, 57),
    yellow: Color::Rgb(223, 142, 29),
    surface: Color::Rgb(230, 233, 239),
    text: Color::Rgb(76, 79, 105),
    text_dim: Color::Rgb(124, 127, 147),
    overlay: Color::Rgb(172, 176, 190),
    command_bg: Color::Rgb(239, 241, 245),
};

impl Palette {
    pub(crate) fn for_theme(theme: Theme) -> &'static Palette {
        match theme {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }

    pub(crate) fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn title_style(&self) -> Style {
        Style::default()
            .fg(self.text_dim)
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn selected_style(&self) -> Style {
        Style::default().fg(self.header_bg).bg(self.accent)
    }

    pub(crate) fn normal_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub(crate) fn dim_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub(crate) fn income_style(&self) -> Style {
        Style::default().fg(self.green)
    }

    pub(crate) fn expense_style(&self) -> Style {
        Style::default().fg(self.red)
    }

    pub(crate) fn alt_row_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    pub(crate) fn command_bar_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.command_bg)
    }

    pub(crate) fn status_bar_style(&self) -> Style {
        Style::default().fg(self.text_dim).bg(self.surface)
    }

    pub(crate) fn status_color(&self, status: BudgetStatus) -> Color {
        match status {
            BudgetStatus::OnTrack => self.green,
            BudgetStatus::Warning => self.yellow,
            BudgetStatus::OverBudget => self.red,
        }
    }
}
