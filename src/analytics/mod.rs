//! Derived figures shown on the dashboard, budgets and analytics screens.
//! Everything here is a pure function of store state.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::Budget;
use crate::store::{FinanceStore, MonthlyStats};

/// Savings as a percentage of income. Zero when there is no income.
pub(crate) fn savings_rate(stats: &MonthlyStats) -> Decimal {
    rate(stats.savings, stats.total_income)
}

fn rate(savings: Decimal, income: Decimal) -> Decimal {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match savings.checked_div(income) {
        Some(ratio) => ratio.saturating_mul(Decimal::ONE_HUNDRED),
        None if savings.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Savings rate shifted by 50 and clamped to 0..=100, rounded half away from zero.
pub(crate) fn health_score(stats: &MonthlyStats) -> u8 {
    savings_rate(stats)
        .saturating_add(Decimal::from(50))
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u8()
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HealthRating {
    Excellent,
    Good,
    NeedsImprovement,
}

impl HealthRating {
    pub(crate) fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            _ => Self::NeedsImprovement,
        }
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl std::fmt::Display for HealthRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ── Budgets ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BudgetTotals {
    pub(crate) total_budget: Decimal,
    pub(crate) total_spent: Decimal,
    pub(crate) remaining: Decimal,
}

pub(crate) fn budget_totals(budgets: &[Budget]) -> BudgetTotals {
    let total_budget = saturating_sum(budgets.iter().map(|b| b.amount));
    let total_spent = saturating_sum(budgets.iter().map(|b| b.spent));
    BudgetTotals {
        total_budget,
        total_spent,
        remaining: total_budget.saturating_sub(total_spent),
    }
}

// ── Trend ─────────────────────────────────────────────────────

/// The `count` month keys ("YYYY-MM") ending with the month of `anchor`,
/// oldest first.
pub(crate) fn recent_months(anchor: NaiveDate, count: usize) -> Vec<String> {
    let Some(first_of_month) = anchor.with_day(1) else {
        return Vec::new();
    };
    (0..count)
        .rev()
        .filter_map(|back| {
            let back = u32::try_from(back).ok()?;
            first_of_month.checked_sub_months(Months::new(back))
        })
        .map(|d| d.format("%Y-%m").to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthPoint {
    pub(crate) month: String,
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
    pub(crate) savings: Decimal,
}

pub(crate) fn monthly_trend(store: &FinanceStore, months: &[String]) -> Vec<MonthPoint> {
    months
        .iter()
        .map(|month| {
            let stats = store.monthly_stats(month);
            MonthPoint {
                month: month.clone(),
                income: stats.total_income,
                expenses: stats.total_expenses,
                savings: stats.savings,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TrendSummary {
    pub(crate) total_income: Decimal,
    pub(crate) total_expenses: Decimal,
    pub(crate) total_savings: Decimal,
    pub(crate) avg_savings_rate: Decimal,
}

impl TrendSummary {
    pub(crate) fn from_points(points: &[MonthPoint]) -> Self {
        let total_income = saturating_sum(points.iter().map(|p| p.income));
        let total_expenses = saturating_sum(points.iter().map(|p| p.expenses));
        let total_savings = saturating_sum(points.iter().map(|p| p.savings));
        Self {
            total_income,
            total_expenses,
            total_savings,
            avg_savings_rate: rate(total_savings, total_income),
        }
    }
}

/// Largest expense categories first; ties broken by name.
pub(crate) fn top_categories(
    breakdown: &BTreeMap<String, Decimal>,
    limit: usize,
) -> Vec<(String, Decimal)> {
    let mut entries: Vec<(String, Decimal)> = breakdown
        .iter()
        .map(|(name, amount)| (name.clone(), *amount))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests;
