#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::{NewTransaction, Theme, TransactionKind};
use crate::store::FinanceStore;
use rust_decimal_macros::dec;

const KEY: &str = "finguard-storage";

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_schema_version_recorded() {
    let db = Database::open_in_memory().unwrap();
    let version: i32 = db
        .conn
        .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}

#[test]
fn test_reopen_does_not_duplicate_version_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("finguard.db");
    drop(Database::open(&path).unwrap());
    let db = Database::open(&path).unwrap();
    let rows: i64 = db
        .conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

// ── Key/value ─────────────────────────────────────────────────

#[test]
fn test_missing_key_is_none() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_value("nothing").unwrap().is_none());
    assert!(db.load_state(KEY).unwrap().is_none());
}

#[test]
fn test_put_overwrites() {
    let db = Database::open_in_memory().unwrap();
    db.put_value("k", "one").unwrap();
    db.put_value("k", "two").unwrap();
    assert_eq!(db.get_value("k").unwrap().as_deref(), Some("two"));
    let rows: i64 = db
        .conn
        .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

// ── State round-trip ──────────────────────────────────────────

#[test]
fn test_seed_state_roundtrip() {
    let db = Database::open_in_memory().unwrap();
    let state = FinanceState::seed();
    db.save_state(KEY, &state).unwrap();
    assert_eq!(db.load_state(KEY).unwrap(), Some(state));
}

#[test]
fn test_mutated_state_roundtrip() {
    let db = Database::open_in_memory().unwrap();
    let mut store = FinanceStore::seeded();
    store.add_transaction(NewTransaction::new(
        TransactionKind::Expense,
        dec!(12.34),
        "Food".into(),
        "Café – déjà vu".into(),
        "2024-02-29".into(),
    ));
    store.set_budget("Travel", dec!(1000.50));
    store.delete_transaction("1");
    store.toggle_theme();

    db.save_state(KEY, store.state()).unwrap();
    let loaded = db.load_state(KEY).unwrap().unwrap();
    assert_eq!(&loaded, store.state());
    assert_eq!(loaded.theme, Theme::Dark);
    assert_eq!(loaded.budgets.last().unwrap().amount, dec!(1000.50));
}

#[test]
fn test_empty_state_roundtrip() {
    let db = Database::open_in_memory().unwrap();
    let state = FinanceState::default();
    db.save_state(KEY, &state).unwrap();
    assert_eq!(db.load_state(KEY).unwrap(), Some(state));
}

#[test]
fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("finguard.db");
    {
        let db = Database::open(&path).unwrap();
        let mut store = FinanceStore::seeded();
        store.set_budget("Bills", dec!(900));
        db.save_state(KEY, store.state()).unwrap();
    }
    let db = Database::open(&path).unwrap();
    let loaded = db.load_state(KEY).unwrap().unwrap();
    assert_eq!(loaded.budgets[4].amount, dec!(900));
}

#[test]
fn test_stored_document_shape() {
    let db = Database::open_in_memory().unwrap();
    db.save_state(KEY, &FinanceState::seed()).unwrap();
    let raw = db.get_value(KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["theme"], "light");
    assert_eq!(json["transactions"][0]["type"], "income");
    assert_eq!(json["budgets"][0]["category"], "Food");
}

#[test]
fn test_accepts_numeric_amounts() {
    let db = Database::open_in_memory().unwrap();
    db.put_value(
        KEY,
        r#"{"transactions":[{"id":"1","type":"expense","amount":12.5,"category":"Food","description":"x","date":"2024-01-01"}],
            "budgets":[{"category":"Food","amount":100,"spent":12.5}],"theme":"dark"}"#,
    )
    .unwrap();
    let state = db.load_state(KEY).unwrap().unwrap();
    assert_eq!(state.transactions[0].amount, dec!(12.5));
    assert_eq!(state.budgets[0].spent, dec!(12.5));
    assert_eq!(state.theme, Theme::Dark);
}

#[test]
fn test_corrupt_document_is_error() {
    let db = Database::open_in_memory().unwrap();
    db.put_value(KEY, "{not json").unwrap();
    assert!(db.load_state(KEY).is_err());
}
