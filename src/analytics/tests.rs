#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{NewTransaction, TransactionKind};
use crate::store::{FinanceState, FinanceStore};

fn stats(income: Decimal, expenses: Decimal) -> MonthlyStats {
    MonthlyStats {
        total_income: income,
        total_expenses: expenses,
        savings: income - expenses,
        category_breakdown: BTreeMap::new(),
    }
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// ── Savings rate & health ─────────────────────────────────────

#[test]
fn test_savings_rate_seed_month() {
    let store = FinanceStore::seeded();
    let s = store.monthly_stats("2024-01");
    assert_eq!(savings_rate(&s), dec!(64.3));
}

#[test]
fn test_savings_rate_no_income_is_zero() {
    assert_eq!(savings_rate(&stats(Decimal::ZERO, dec!(40))), Decimal::ZERO);
    assert_eq!(savings_rate(&MonthlyStats::default()), Decimal::ZERO);
}

#[test]
fn test_savings_rate_negative() {
    assert_eq!(savings_rate(&stats(dec!(1000), dec!(1150))), dec!(-15));
}

#[test]
fn test_health_score_clamps_high() {
    assert_eq!(health_score(&stats(dec!(5000), dec!(1785))), 100);
}

#[test]
fn test_health_score_clamps_low() {
    assert_eq!(health_score(&stats(dec!(100), dec!(1000))), 0);
}

#[test]
fn test_health_score_no_income_is_fifty() {
    assert_eq!(health_score(&MonthlyStats::default()), 50);
}

#[test]
fn test_health_score_rounds_half_up() {
    // 12.5% savings rate -> 62.5 -> 63
    assert_eq!(health_score(&stats(dec!(1000), dec!(875))), 63);
    // 12.4% -> 62.4 -> 62
    assert_eq!(health_score(&stats(dec!(1000), dec!(876))), 62);
}

#[test]
fn test_health_rating_bands() {
    assert_eq!(HealthRating::from_score(100), HealthRating::Excellent);
    assert_eq!(HealthRating::from_score(80), HealthRating::Excellent);
    assert_eq!(HealthRating::from_score(79), HealthRating::Good);
    assert_eq!(HealthRating::from_score(60), HealthRating::Good);
    assert_eq!(HealthRating::from_score(59), HealthRating::NeedsImprovement);
    assert_eq!(HealthRating::from_score(0), HealthRating::NeedsImprovement);
    assert_eq!(
        format!("{}", HealthRating::NeedsImprovement),
        "Needs Improvement"
    );
}

// ── Budget totals ─────────────────────────────────────────────

#[test]
fn test_budget_totals_seed() {
    let store = FinanceStore::seeded();
    let totals = budget_totals(store.budgets());
    assert_eq!(totals.total_budget, dec!(1950));
    assert_eq!(totals.total_spent, dec!(585));
    assert_eq!(totals.remaining, dec!(1365));
}

#[test]
fn test_budget_totals_empty() {
    assert_eq!(budget_totals(&[]), BudgetTotals::default());
}

// ── Trend ─────────────────────────────────────────────────────

#[test]
fn test_recent_months_oldest_first() {
    let months = recent_months(date("2024-03-17"), 6);
    assert_eq!(
        months,
        ["2023-10", "2023-11", "2023-12", "2024-01", "2024-02", "2024-03"]
    );
}

#[test]
fn test_recent_months_end_of_month_anchor() {
    // 31st of a month must not skip shorter months
    let months = recent_months(date("2024-03-31"), 2);
    assert_eq!(months, ["2024-02", "2024-03"]);
}

#[test]
fn test_recent_months_zero() {
    assert!(recent_months(date("2024-03-01"), 0).is_empty());
}

#[test]
fn test_monthly_trend_points() {
    let mut store = FinanceStore::seeded();
    store.add_transaction(NewTransaction::new(
        TransactionKind::Expense,
        dec!(60),
        "Food".into(),
        "Takeout".into(),
        "2024-02-11".into(),
    ));
    let points = monthly_trend(&store, &recent_months(date("2024-02-01"), 3));
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].month, "2023-12");
    assert_eq!(points[0].income, Decimal::ZERO);
    assert_eq!(points[1].month, "2024-01");
    assert_eq!(points[1].income, dec!(5000));
    assert_eq!(points[1].expenses, dec!(1785));
    assert_eq!(points[1].savings, dec!(3215));
    assert_eq!(points[2].expenses, dec!(60));
    assert_eq!(points[2].savings, dec!(-60));
}

#[test]
fn test_trend_summary() {
    let store = FinanceStore::seeded();
    let points = monthly_trend(&store, &recent_months(date("2024-02-01"), 2));
    let summary = TrendSummary::from_points(&points);
    assert_eq!(summary.total_income, dec!(5000));
    assert_eq!(summary.total_expenses, dec!(1785));
    assert_eq!(summary.total_savings, dec!(3215));
    assert_eq!(summary.avg_savings_rate, dec!(64.3));
}

#[test]
fn test_trend_summary_without_income() {
    let store = FinanceStore::new(FinanceState::default());
    let points = monthly_trend(&store, &recent_months(date("2024-02-01"), 6));
    let summary = TrendSummary::from_points(&points);
    assert_eq!(summary, TrendSummary::default());
}

#[test]
fn test_extreme_amounts_saturate() {
    let deficit = stats(Decimal::new(1, 28), Decimal::MAX);
    assert_eq!(savings_rate(&deficit), Decimal::MIN);
    assert_eq!(health_score(&deficit), 0);

    let budgets = [
        Budget::new("A".into(), Decimal::MAX),
        Budget::new("B".into(), Decimal::MAX),
    ];
    let totals = budget_totals(&budgets);
    assert_eq!(totals.total_budget, Decimal::MAX);
    assert_eq!(totals.remaining, Decimal::MAX);

    let point = MonthPoint {
        month: "2024-01".into(),
        income: Decimal::MAX,
        expenses: Decimal::ZERO,
        savings: Decimal::MAX,
    };
    let summary = TrendSummary::from_points(&[point.clone(), point]);
    assert_eq!(summary.total_income, Decimal::MAX);
    assert_eq!(summary.total_savings, Decimal::MAX);
    assert_eq!(summary.avg_savings_rate, dec!(100));
}

// ── Top categories ────────────────────────────────────────────

#[test]
fn test_top_categories_sorted_desc() {
    let store = FinanceStore::seeded();
    let top = top_categories(&store.monthly_stats("2024-01").category_breakdown, 5);
    let names: Vec<&str> = top.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["Rent", "Food", "Transportation", "Entertainment"]);
    assert_eq!(top[0].1, dec!(1200));
}

#[test]
fn test_top_categories_limit_and_ties() {
    let mut breakdown = BTreeMap::new();
    breakdown.insert("B".to_string(), dec!(10));
    breakdown.insert("A".to_string(), dec!(10));
    breakdown.insert("C".to_string(), dec!(30));
    let top = top_categories(&breakdown, 2);
    assert_eq!(top, vec![("C".to_string(), dec!(30)), ("A".to_string(), dec!(10))]);
}
