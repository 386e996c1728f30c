use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{Transaction, TransactionKind};

/// Aggregates for one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct MonthlyStats {
    pub(crate) total_income: Decimal,
    pub(crate) total_expenses: Decimal,
    /// `total_income - total_expenses`; negative when overspent.
    pub(crate) savings: Decimal,
    /// Expense totals per category. Categories without expenses are absent.
    pub(crate) category_breakdown: BTreeMap<String, Decimal>,
}

impl MonthlyStats {
    /// Single pass over `transactions`, keeping those dated in `month`.
    /// Sums saturate at the `Decimal` bounds.
    pub(crate) fn compute(transactions: &[Transaction], month: &str) -> Self {
        let mut stats = Self::default();
        for txn in transactions.iter().filter(|t| t.in_month(month)) {
            match txn.kind {
                TransactionKind::Income => {
                    stats.total_income = stats.total_income.saturating_add(txn.amount);
                }
                TransactionKind::Expense => {
                    stats.total_expenses = stats.total_expenses.saturating_add(txn.amount);
                    let total = stats
                        .category_breakdown
                        .entry(txn.category.clone())
                        .or_insert(Decimal::ZERO);
                    *total = total.saturating_add(txn.amount);
                }
            }
        }
        stats.savings = stats.total_income.saturating_sub(stats.total_expenses);
        stats
    }
}
