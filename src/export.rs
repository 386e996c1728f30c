use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::Transaction;

const HEADER: [&str; 6] = ["id", "date", "type", "category", "description", "amount"];

/// Writes `transactions` as CSV with a header row. Returns the row count.
pub(crate) fn write_csv<'a, W: Write>(
    out: W,
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(HEADER)?;
    let mut count = 0;
    for txn in transactions {
        let amount = txn.amount.to_string();
        writer.write_record([
            txn.id.as_str(),
            txn.date.as_str(),
            txn.kind.as_str(),
            txn.category.as_str(),
            txn.description.as_str(),
            amount.as_str(),
        ])?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

pub(crate) fn export_to_file<'a>(
    path: &Path,
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    write_csv(file, transactions)
        .with_context(|| format!("Failed to write export file: {}", path.display()))
}

/// Expands a leading `~/` to the home directory.
pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = directories::UserDirs::new()
            .map(|d| d.home_dir().display().to_string())
            .unwrap_or_else(|| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

/// `~/finguard-export-<suffix>.csv`, falling back to the working directory.
pub(crate) fn default_export_path(suffix: &str) -> String {
    shellexpand(&format!("~/finguard-export-{suffix}.csv"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::store::FinanceStore;

    #[test]
    fn test_write_csv_seed_month() {
        let store = FinanceStore::seeded();
        let mut buf = Vec::new();
        let count = write_csv(&mut buf, store.transactions_in_month("2024-01")).unwrap();
        assert_eq!(count, 5);
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,date,type,category,description,amount");
        assert_eq!(lines[1], "1,2024-01-01,income,Salary,Monthly salary,5000");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_write_csv_quotes_commas() {
        let mut store = FinanceStore::seeded();
        store.update_transaction(
            "3",
            crate::models::TransactionPatch {
                description: Some("Bread, milk".into()),
                ..Default::default()
            },
        );
        let mut buf = Vec::new();
        write_csv(&mut buf, store.transaction("3")).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"Bread, milk\""));
    }

    #[test]
    fn test_write_csv_empty() {
        let mut buf = Vec::new();
        let count = write_csv(&mut buf, std::iter::empty::<&crate::models::Transaction>()).unwrap();
        assert_eq!(count, 0);
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let store = FinanceStore::seeded();
        let count = export_to_file(&path, store.transactions()).unwrap();
        assert_eq!(count, 5);
        assert!(std::fs::read_to_string(&path).unwrap().contains("Rent"));
    }

    #[test]
    fn test_shellexpand_passthrough() {
        assert_eq!(shellexpand("/tmp/x.csv"), "/tmp/x.csv");
        assert_eq!(shellexpand("rel/x.csv"), "rel/x.csv");
        assert!(!shellexpand("~/x.csv").starts_with('~'));
    }
}
