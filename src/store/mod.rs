mod ids;
mod seed;
mod stats;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::*;

use ids::IdGenerator;
pub(crate) use stats::MonthlyStats;

/// Everything that is persisted: both collections and the theme flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct FinanceState {
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) budgets: Vec<Budget>,
    pub(crate) theme: Theme,
}

impl FinanceState {
    pub(crate) fn seed() -> Self {
        Self {
            transactions: seed::transactions(),
            budgets: seed::budgets(),
            theme: Theme::Light,
        }
    }
}

/// Owns the finance state. All mutation goes through the command methods.
pub(crate) struct FinanceStore {
    state: FinanceState,
    ids: IdGenerator,
}

impl FinanceStore {
    pub(crate) fn new(state: FinanceState) -> Self {
        let mut ids = IdGenerator::new();
        for txn in &state.transactions {
            ids.observe(&txn.id);
        }
        Self { state, ids }
    }

    #[cfg(test)]
    pub(crate) fn seeded() -> Self {
        Self::new(FinanceState::seed())
    }

    pub(crate) fn state(&self) -> &FinanceState {
        &self.state
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub(crate) fn budgets(&self) -> &[Budget] {
        &self.state.budgets
    }

    pub(crate) fn theme(&self) -> Theme {
        self.state.theme
    }

    pub(crate) fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.state.transactions.iter().find(|t| t.id == id)
    }

    pub(crate) fn budget(&self, category: &str) -> Option<&Budget> {
        Budget::find(&self.state.budgets, category)
    }

    /// Transactions whose date starts with `month`, in insertion order.
    pub(crate) fn transactions_in_month<'a>(
        &'a self,
        month: &'a str,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.state.transactions.iter().filter(move |t| t.in_month(month))
    }

    // ── Commands ──────────────────────────────────────────────

    /// Appends the transaction under a fresh id. An expense also bumps the
    /// `spent` of the budget with the same category, if there is one.
    /// `spent` saturates instead of overflowing.
    pub(crate) fn add_transaction(&mut self, new: NewTransaction) -> String {
        let id = self.ids.next(chrono::Utc::now().timestamp_millis());
        let txn = Transaction::from_new(id.clone(), new);

        if txn.is_expense() {
            if let Some(budget) = self
                .state
                .budgets
                .iter_mut()
                .find(|b| b.category == txn.category)
            {
                budget.spent = budget.spent.saturating_add(txn.amount);
                debug!(category = %budget.category, spent = %budget.spent, "budget spent updated");
            }
        }

        self.state.transactions.push(txn);
        id
    }

    /// Merges `patch` into the matching transaction. Unknown ids are ignored
    /// and budgets are left as they are.
    pub(crate) fn update_transaction(&mut self, id: &str, patch: TransactionPatch) {
        if let Some(txn) = self.state.transactions.iter_mut().find(|t| t.id == id) {
            txn.apply(patch);
        }
    }

    /// Removes the matching transaction, if any. Budget `spent` is not reversed.
    pub(crate) fn delete_transaction(&mut self, id: &str) {
        self.state.transactions.retain(|t| t.id != id);
    }

    pub(crate) fn set_budget(&mut self, category: &str, amount: Decimal) {
        match self
            .state
            .budgets
            .iter_mut()
            .find(|b| b.category == category)
        {
            Some(budget) => budget.amount = amount,
            None => self
                .state
                .budgets
                .push(Budget::new(category.to_string(), amount)),
        }
    }

    pub(crate) fn toggle_theme(&mut self) {
        self.state.theme = self.state.theme.toggled();
    }

    // ── Derivations ───────────────────────────────────────────

    pub(crate) fn monthly_stats(&self, month: &str) -> MonthlyStats {
        MonthlyStats::compute(&self.state.transactions, month)
    }
}
