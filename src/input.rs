//! Parsing and validation of user-entered values, shared by the CLI and the
//! TUI command line. The store accepts anything; bad input stops here.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{NewTransaction, TransactionKind, TransactionPatch};

pub(crate) const ADD_USAGE: &str =
    "add <income|expense> <amount> <category> <YYYY-MM-DD> [description...]";
pub(crate) const EDIT_USAGE: &str =
    "edit <id> [--type T] [--amount A] [--category C] [--date D] [--description TEXT]";
pub(crate) const BUDGET_USAGE: &str = "budget <category> <amount>";
pub(crate) const EXPORT_USAGE: &str = "export [path] [--month YYYY-MM]";

/// Exclusive upper bound on entered amounts.
const AMOUNT_LIMIT: i64 = 1_000_000_000_000_000;
const AMOUNT_MAX_SCALE: u32 = 2;

/// A positive decimal amount below one quadrillion with at most two decimal
/// places. A leading `$` and thousands commas are allowed.
pub(crate) fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned: String = s
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let Ok(amount) = Decimal::from_str(&cleaned) else {
        bail!("Invalid amount: {s}");
    };
    if amount <= Decimal::ZERO {
        bail!("Amount must be greater than 0");
    }
    if amount >= Decimal::from(AMOUNT_LIMIT) {
        bail!("Amount must be less than 1,000,000,000,000,000");
    }
    if amount.normalize().scale() > AMOUNT_MAX_SCALE {
        bail!("Amount can have at most {AMOUNT_MAX_SCALE} decimal places");
    }
    Ok(amount)
}

pub(crate) fn parse_kind(s: &str) -> Result<TransactionKind> {
    match TransactionKind::parse(s) {
        Some(kind) => Ok(kind),
        None => {
            let valid: Vec<&str> = TransactionKind::all().iter().map(|k| k.as_str()).collect();
            bail!("Invalid type: {s}. Expected one of: {}", valid.join(", "))
        }
    }
}

/// A real calendar date in `YYYY-MM-DD` form.
pub(crate) fn parse_date(s: &str) -> Result<String> {
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(d) => Ok(d.format("%Y-%m-%d").to_string()),
        Err(_) => bail!("Invalid date: {s}. Use YYYY-MM-DD (e.g. 2024-01-15)"),
    }
}

/// Accepts "2024-01", "2024-1", or a bare month ("1", "01") in `default_year`.
pub(crate) fn parse_month(s: &str, default_year: i32) -> Result<String> {
    let s = s.trim();
    let candidate = if s.len() <= 2 {
        format!("{default_year}-{s:0>2}-01")
    } else {
        format!("{s}-01")
    };
    match NaiveDate::parse_from_str(&candidate, "%Y-%m-%d") {
        Ok(d) => Ok(d.format("%Y-%m").to_string()),
        Err(_) => bail!("Invalid month: {s}. Use YYYY-MM (e.g. 2024-01)"),
    }
}

/// `<type> <amount> <category> <date> [description...]`
pub(crate) fn parse_new_transaction(args: &[&str]) -> Result<NewTransaction> {
    let [kind, amount, category, date, description @ ..] = args else {
        bail!("Usage: {ADD_USAGE}");
    };
    Ok(NewTransaction::new(
        parse_kind(kind)?,
        parse_amount(amount)?,
        category.to_string(),
        description.join(" "),
        parse_date(date)?,
    ))
}

/// `--flag value` pairs. `--description` takes every word up to the next flag.
pub(crate) fn parse_patch(args: &[&str]) -> Result<TransactionPatch> {
    let mut patch = TransactionPatch::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i];
        let end = args[i + 1..]
            .iter()
            .position(|a| a.starts_with("--"))
            .map_or(args.len(), |p| i + 1 + p);
        let values = &args[i + 1..end];
        if values.is_empty() {
            bail!("Missing value for {flag}");
        }
        match flag {
            "--type" => patch.kind = Some(parse_kind(single(flag, values)?)?),
            "--amount" => patch.amount = Some(parse_amount(single(flag, values)?)?),
            "--category" => patch.category = Some(values.join(" ")),
            "--date" => patch.date = Some(parse_date(single(flag, values)?)?),
            "--description" => patch.description = Some(values.join(" ")),
            other => bail!("Unknown option: {other}"),
        }
        i = end;
    }
    if patch.is_empty() {
        bail!("Usage: {EDIT_USAGE}");
    }
    Ok(patch)
}

fn single<'a>(flag: &str, values: &[&'a str]) -> Result<&'a str> {
    match values {
        [v] => Ok(*v),
        _ => bail!("{flag} takes a single value"),
    }
}

/// `<category...> <amount>`: the last word is the amount, the rest the category.
pub(crate) fn parse_budget(args: &str) -> Result<(String, Decimal)> {
    let Some((category, amount)) = args.trim().rsplit_once(' ') else {
        bail!("Usage: {BUDGET_USAGE}");
    };
    let category = category.trim();
    if category.is_empty() {
        bail!("Usage: {BUDGET_USAGE}");
    }
    Ok((category.to_string(), parse_amount(amount)?))
}

/// `[path] [--month MONTH]` in any order. Returns the raw path, if any, and
/// the normalised month.
pub(crate) fn parse_export_args(
    args: &[&str],
    default_year: i32,
) -> Result<(Option<String>, Option<String>)> {
    let mut path = None;
    let mut month = None;
    let mut iter = args.iter();
    while let Some(&arg) = iter.next() {
        match arg {
            "--month" => match iter.next() {
                Some(value) if !value.starts_with("--") => {
                    month = Some(parse_month(value, default_year)?);
                }
                _ => bail!("Missing value for --month"),
            },
            flag if flag.starts_with("--") => bail!("Unknown option: {flag}"),
            _ if path.is_some() => bail!("Usage: {EXPORT_USAGE}"),
            _ => path = Some(arg.to_string()),
        }
    }
    Ok((path, month))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("42").unwrap(), dec!(42));
        assert_eq!(parse_amount("$1,234.50").unwrap(), dec!(1234.50));
        assert_eq!(parse_amount("0.01").unwrap(), dec!(0.01));
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn test_parse_amount_limits() {
        assert_eq!(
            parse_amount("999,999,999,999,999.99").unwrap(),
            dec!(999999999999999.99)
        );
        assert_eq!(parse_amount("12.500").unwrap(), dec!(12.5));
        assert!(parse_amount("1000000000000000").is_err());
        assert!(parse_amount("79228162514264337593543950335").is_err());
        assert!(parse_amount("0.001").is_err());
        assert!(parse_amount("0.0000000000000000000000000001").is_err());
    }

    #[test]
    fn test_extreme_amounts_rejected_before_the_store() {
        assert!(parse_new_transaction(&[
            "income",
            "79228162514264337593543950335",
            "Salary",
            "2024-01-20"
        ])
        .is_err());
        assert!(parse_budget("Food 0.0000000000000000000000000001").is_err());
        assert!(parse_patch(&["--amount", "1e30"]).is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-01-15").unwrap(), "2024-01-15");
        assert_eq!(parse_date("2024-2-3").unwrap(), "2024-02-03");
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("01/15/2024").is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-01", 2020).unwrap(), "2024-01");
        assert_eq!(parse_month("2024-1", 2020).unwrap(), "2024-01");
        assert_eq!(parse_month("3", 2025).unwrap(), "2025-03");
        assert_eq!(parse_month("11", 2025).unwrap(), "2025-11");
        assert!(parse_month("13", 2025).is_err());
        assert!(parse_month("2024-13", 2025).is_err());
        assert!(parse_month("soon", 2025).is_err());
    }

    #[test]
    fn test_parse_new_transaction() {
        let new =
            parse_new_transaction(&["expense", "50", "Food", "2024-01-20", "Team", "lunch"])
                .unwrap();
        assert_eq!(new.kind, TransactionKind::Expense);
        assert_eq!(new.amount, dec!(50));
        assert_eq!(new.category, "Food");
        assert_eq!(new.date, "2024-01-20");
        assert_eq!(new.description, "Team lunch");
    }

    #[test]
    fn test_parse_new_transaction_without_description() {
        let new = parse_new_transaction(&["income", "5000", "Salary", "2024-01-01"]).unwrap();
        assert_eq!(new.description, "");
    }

    #[test]
    fn test_parse_new_transaction_rejects_bad_input() {
        assert!(parse_new_transaction(&["expense", "50", "Food"]).is_err());
        assert!(parse_new_transaction(&["gift", "50", "Food", "2024-01-20"]).is_err());
        assert!(parse_new_transaction(&["expense", "0", "Food", "2024-01-20"]).is_err());
        assert!(parse_new_transaction(&["expense", "5", "Food", "yesterday"]).is_err());
    }

    #[test]
    fn test_parse_patch() {
        let patch = parse_patch(&[
            "--amount",
            "75",
            "--description",
            "Weekly",
            "groceries",
            "--type",
            "expense",
        ])
        .unwrap();
        assert_eq!(patch.amount, Some(dec!(75)));
        assert_eq!(patch.description.as_deref(), Some("Weekly groceries"));
        assert_eq!(patch.kind, Some(TransactionKind::Expense));
        assert!(patch.category.is_none());
        assert!(patch.date.is_none());
    }

    #[test]
    fn test_parse_patch_errors() {
        assert!(parse_patch(&[]).is_err());
        assert!(parse_patch(&["--amount"]).is_err());
        assert!(parse_patch(&["--amount", "1", "2"]).is_err());
        assert!(parse_patch(&["--colour", "red"]).is_err());
        assert!(parse_patch(&["--date", "2024-99-01"]).is_err());
    }

    #[test]
    fn test_parse_budget() {
        let (cat, amount) = parse_budget("Food 500").unwrap();
        assert_eq!(cat, "Food");
        assert_eq!(amount, dec!(500));
        let (cat, _) = parse_budget("Home & Garden 120.5").unwrap();
        assert_eq!(cat, "Home & Garden");
        assert!(parse_budget("Food").is_err());
        assert!(parse_budget("Food zero").is_err());
        assert!(parse_budget(" 50").is_err());
    }

    #[test]
    fn test_parse_export_args() {
        assert_eq!(parse_export_args(&[], 2024).unwrap(), (None, None));
        assert_eq!(
            parse_export_args(&["out.csv"], 2024).unwrap(),
            (Some("out.csv".to_string()), None)
        );
        assert_eq!(
            parse_export_args(&["--month", "2024-01", "out.csv"], 2024).unwrap(),
            (Some("out.csv".to_string()), Some("2024-01".to_string()))
        );
        assert_eq!(
            parse_export_args(&["~/jan.csv", "--month", "1"], 2025).unwrap(),
            (Some("~/jan.csv".to_string()), Some("2025-01".to_string()))
        );
    }

    #[test]
    fn test_parse_export_args_errors() {
        assert!(parse_export_args(&["--month"], 2024).is_err());
        assert!(parse_export_args(&["--month", "--all"], 2024).is_err());
        assert!(parse_export_args(&["--month", "2024-13"], 2024).is_err());
        assert!(parse_export_args(&["a.csv", "b.csv"], 2024).is_err());
        assert!(parse_export_args(&["--all"], 2024).is_err());
    }
}
