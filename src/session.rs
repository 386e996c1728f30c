use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::db::Database;
use crate::models::{NewTransaction, TransactionPatch};
use crate::store::{FinanceState, FinanceStore};

/// The running application's state: the store plus the storage it is
/// written back to after every command.
pub(crate) struct Session {
    store: FinanceStore,
    db: Database,
    key: String,
}

impl Session {
    /// Rehydrates from storage, or starts from the seed data when nothing is
    /// stored. Unreadable stored state is logged and replaced by the seed in
    /// memory; it is only overwritten by the next command.
    pub(crate) fn load(db: Database, key: &str) -> Self {
        let state = match db.load_state(key) {
            Ok(Some(state)) => {
                info!(
                    transactions = state.transactions.len(),
                    budgets = state.budgets.len(),
                    "restored stored state"
                );
                state
            }
            Ok(None) => {
                info!("no stored state, using seed data");
                FinanceState::seed()
            }
            Err(e) => {
                warn!(error = ?e, "could not read stored state, using seed data");
                FinanceState::seed()
            }
        };
        Self {
            store: FinanceStore::new(state),
            db,
            key: key.to_string(),
        }
    }

    pub(crate) fn store(&self) -> &FinanceStore {
        &self.store
    }

    // ── Commands ──────────────────────────────────────────────

    pub(crate) fn add_transaction(&mut self, new: NewTransaction) -> String {
        let kind = new.kind;
        let amount = new.amount;
        let id = self.store.add_transaction(new);
        info!(%id, %kind, %amount, "transaction added");
        self.persist();
        id
    }

    pub(crate) fn update_transaction(&mut self, id: &str, patch: TransactionPatch) {
        self.store.update_transaction(id, patch);
        info!(id, "transaction updated");
        self.persist();
    }

    pub(crate) fn delete_transaction(&mut self, id: &str) {
        self.store.delete_transaction(id);
        info!(id, "transaction deleted");
        self.persist();
    }

    pub(crate) fn set_budget(&mut self, category: &str, amount: Decimal) {
        self.store.set_budget(category, amount);
        info!(category, %amount, "budget set");
        self.persist();
    }

    pub(crate) fn toggle_theme(&mut self) {
        self.store.toggle_theme();
        info!(theme = %self.store.theme(), "theme toggled");
        self.persist();
    }

    /// Best effort: a failed write is logged, never surfaced to the caller.
    fn persist(&self) {
        if let Err(e) = self.db.save_state(&self.key, self.store.state()) {
            warn!(error = ?e, "failed to persist state");
        }
    }
}
