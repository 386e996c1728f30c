mod budget;
mod theme;
mod transaction;

pub(crate) use budget::{Budget, BudgetStatus};
pub(crate) use theme::Theme;
pub(crate) use transaction::{NewTransaction, Transaction, TransactionKind, TransactionPatch};
