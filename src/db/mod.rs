mod schema;
pub(crate) mod upgrade;

use anyhow::{Context, Result};
use chrono::Month;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::{debug, warn};

use crate::models::{current_month, Document};

pub(crate) use schema::{DOCUMENT_KEY, EDITING_EXPENSE_KEY};

/// A small persistent key-value store holding the serialized document.
pub(crate) struct Store {
    conn: Connection,
}

impl Store {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open store: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut store = Self { conn };
        store.migrate().context("Store migration failed")?;
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh store - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?
            .unwrap_or(0);
        if current > schema::CURRENT_VERSION {
            anyhow::bail!(
                "Store schema version {current} is newer than this build supports ({})",
                schema::CURRENT_VERSION
            );
        }

        Ok(())
    }

    // ── Key-value primitives ──────────────────────────────────

    pub(crate) fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?)
    }

    pub(crate) fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub(crate) fn remove(&self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    // ── Document ──────────────────────────────────────────────

    /// Load the document, upgrading older layouts. Legacy limits are filed
    /// under the current calendar month.
    pub(crate) fn load(&self) -> Result<Document> {
        self.load_as_of(current_month())
    }

    pub(crate) fn load_as_of(&self, now: Month) -> Result<Document> {
        let Some(raw) = self.get(DOCUMENT_KEY)? else {
            debug!("no stored document, starting empty");
            return Ok(Document::default());
        };
        let mut value: serde_json::Value = serde_json::from_str(&raw)
            .with_context(|| format!("Stored value under `{DOCUMENT_KEY}` is not valid JSON"))?;
        upgrade::upgrade(&mut value, now)
            .with_context(|| format!("Failed to upgrade document under `{DOCUMENT_KEY}`"))?;
        let doc: Document = serde_json::from_value(value)
            .with_context(|| format!("Stored document under `{DOCUMENT_KEY}` has an unexpected shape"))?;
        debug!(expenses = doc.expenses.len(), "document loaded");
        Ok(doc)
    }

    pub(crate) fn save(&self, doc: &Document) -> Result<()> {
        let raw = serde_json::to_string(doc).context("Failed to serialize document")?;
        self.set(DOCUMENT_KEY, &raw)?;
        debug!(bytes = raw.len(), "document saved");
        Ok(())
    }

    /// One load-modify-save cycle. Nothing is written when `f` fails.
    pub(crate) fn update<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Document) -> Result<T>,
    {
        let mut doc = self.load()?;
        let out = f(&mut doc)?;
        self.save(&doc)?;
        Ok(out)
    }

    // ── Edit hand-off ─────────────────────────────────────────

    /// The expense an edit flow was started for, if any.
    pub(crate) fn editing_expense(&self) -> Result<Option<u64>> {
        let Some(raw) = self.get(EDITING_EXPENSE_KEY)? else {
            return Ok(None);
        };
        match raw.trim().parse::<u64>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                warn!(value = %raw, "ignoring unreadable editing expense id");
                Ok(None)
            }
        }
    }

    pub(crate) fn set_editing_expense(&self, id: u64) -> Result<()> {
        self.set(EDITING_EXPENSE_KEY, &id.to_string())
    }

    pub(crate) fn clear_editing_expense(&self) -> Result<()> {
        self.remove(EDITING_EXPENSE_KEY)
    }
}
