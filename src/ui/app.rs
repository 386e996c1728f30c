use chrono::{Local, NaiveDate};

use crate::models::Transaction;
use crate::store::FinanceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Budgets,
    Analytics,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Transactions,
            Self::Budgets,
            Self::Analytics,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Budgets => write!(f, "Budgets"),
            Self::Analytics => write!(f, "Analytics"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: String, description: String },
}

/// View state only. Financial data lives in the session's store and is read
/// from there on every frame.
pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    /// "YYYY-MM" shown on the dashboard, transactions and analytics screens.
    pub(crate) current_month: String,

    // Transactions
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Budgets
    pub(crate) budget_index: usize,
    pub(crate) budget_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self::with_month(Local::now().format("%Y-%m").to_string())
    }

    pub(crate) fn with_month(current_month: String) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            current_month,

            transaction_index: 0,
            transaction_scroll: 0,

            budget_index: 0,
            budget_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// First day of the selected month.
    pub(crate) fn month_start(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&format!("{}-01", self.current_month), "%Y-%m-%d").ok()
    }

    pub(crate) fn set_month(&mut self, month: String) {
        self.current_month = month;
        self.transaction_index = 0;
        self.transaction_scroll = 0;
    }

    pub(crate) fn month_transactions<'a>(&'a self, store: &'a FinanceStore) -> Vec<&'a Transaction> {
        store.transactions_in_month(&self.current_month).collect()
    }

    pub(crate) fn selected_transaction<'a>(
        &'a self,
        store: &'a FinanceStore,
    ) -> Option<&'a Transaction> {
        store
            .transactions_in_month(&self.current_month)
            .nth(self.transaction_index)
    }

    /// Pulls cursors back inside their lists after rows disappear.
    pub(crate) fn clamp_selection(&mut self, store: &FinanceStore) {
        let txn_count = store.transactions_in_month(&self.current_month).count();
        if self.transaction_index >= txn_count {
            self.transaction_index = txn_count.saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
        let budget_count = store.budgets().len();
        if self.budget_index >= budget_count {
            self.budget_index = budget_count.saturating_sub(1);
        }
        if self.budget_scroll > self.budget_index {
            self.budget_scroll = self.budget_index;
        }
    }

    pub(crate) fn transaction_page(&self) -> usize {
        self.visible_rows.max(1)
    }

    /// The budget list shares its area with the totals box.
    pub(crate) fn budget_page(&self) -> usize {
        self.visible_rows.saturating_sub(2).max(1)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
