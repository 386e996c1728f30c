//! First-run data used when nothing has been stored yet.

use rust_decimal::Decimal;

use crate::models::{Budget, Transaction, TransactionKind};

fn txn(
    id: &str,
    kind: TransactionKind,
    amount: i64,
    category: &str,
    description: &str,
    date: &str,
) -> Transaction {
    Transaction {
        id: id.into(),
        kind,
        amount: Decimal::from(amount),
        category: category.into(),
        description: description.into(),
        date: date.into(),
    }
}

fn budget(category: &str, amount: i64, spent: i64) -> Budget {
    Budget {
        category: category.into(),
        amount: Decimal::from(amount),
        spent: Decimal::from(spent),
    }
}

pub(super) fn transactions() -> Vec<Transaction> {
    use TransactionKind::{Expense, Income};
    vec![
        txn("1", Income, 5000, "Salary", "Monthly salary", "2024-01-01"),
        txn("2", Expense, 1200, "Rent", "Monthly rent payment", "2024-01-02"),
        txn("3", Expense, 350, "Food", "Groceries and dining", "2024-01-03"),
        txn(
            "4",
            Expense,
            150,
            "Transportation",
            "Gas and public transport",
            "2024-01-04",
        ),
        txn(
            "5",
            Expense,
            85,
            "Entertainment",
            "Movies and subscriptions",
            "2024-01-05",
        ),
    ]
}

pub(super) fn budgets() -> Vec<Budget> {
    vec![
        budget("Food", 500, 350),
        budget("Transportation", 200, 150),
        budget("Entertainment", 150, 85),
        budget("Shopping", 300, 0),
        budget("Bills", 800, 0),
    ]
}
