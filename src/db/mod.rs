mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

use crate::store::FinanceState;

/// Local storage for the finance state.
///
/// The whole state is one JSON document under a single key in `kv_store`.
/// Writes replace the previous document (last write wins).
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
        }
        Ok(())
    }

    // ── Raw key/value ─────────────────────────────────────────

    pub(crate) fn get_value(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?)
    }

    pub(crate) fn put_value(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    // ── Finance state ─────────────────────────────────────────

    /// `None` when nothing has been stored under `key` yet.
    pub(crate) fn load_state(&self, key: &str) -> Result<Option<FinanceState>> {
        let Some(raw) = self.get_value(key)? else {
            debug!(key, "no stored state");
            return Ok(None);
        };
        let state: FinanceState = serde_json::from_str(&raw)
            .with_context(|| format!("Stored state under '{key}' is not valid"))?;
        debug!(
            key,
            transactions = state.transactions.len(),
            budgets = state.budgets.len(),
            "loaded stored state"
        );
        Ok(Some(state))
    }

    pub(crate) fn save_state(&self, key: &str, state: &FinanceState) -> Result<()> {
        let raw = serde_json::to_string(state).context("Failed to serialize state")?;
        self.put_value(key, &raw)
            .with_context(|| format!("Failed to write state under '{key}'"))
    }
}

#[cfg(test)]
mod tests;
