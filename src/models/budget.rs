use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Budget {
    pub(crate) category: String,
    pub(crate) amount: Decimal,
    /// Incremented by each matching expense as it is added; never recomputed.
    pub(crate) spent: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BudgetStatus {
    OnTrack,
    Warning,
    OverBudget,
}

impl BudgetStatus {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "On track",
            Self::Warning => "Warning",
            Self::OverBudget => "Over budget",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Budget {
    pub(crate) fn new(category: String, amount: Decimal) -> Self {
        Self {
            category,
            amount,
            spent: Decimal::ZERO,
        }
    }

    /// Negative when spending has exceeded the ceiling.
    pub(crate) fn remaining(&self) -> Decimal {
        self.amount.saturating_sub(self.spent)
    }

    /// Share of the ceiling already spent, in percent. `None` for a zero ceiling.
    /// Saturates at `Decimal::MAX` when the ratio is too large to represent.
    pub(crate) fn percent_used(&self) -> Option<Decimal> {
        if self.amount.is_zero() {
            return None;
        }
        let percent = self
            .spent
            .checked_div(self.amount)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::MAX);
        Some(percent)
    }

    pub(crate) fn status(&self) -> BudgetStatus {
        match self.percent_used() {
            Some(p) if p >= Decimal::ONE_HUNDRED => BudgetStatus::OverBudget,
            Some(p) if p >= Decimal::from(80) => BudgetStatus::Warning,
            Some(_) => BudgetStatus::OnTrack,
            None if self.spent > Decimal::ZERO => BudgetStatus::OverBudget,
            None => BudgetStatus::OnTrack,
        }
    }

    /// Find a budget by exact category name in a slice.
    pub(crate) fn find<'a>(budgets: &'a [Budget], category: &str) -> Option<&'a Budget> {
        budgets.iter().find(|b| b.category == category)
    }
}
