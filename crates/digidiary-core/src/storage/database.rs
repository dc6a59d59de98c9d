//! SQLite-based journal storage.
//!
//! Provides persistent storage for:
//! - Journal entries, keyed by id and filtered by owning user
//! - The shared collection of motivational quotes

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use uuid::Uuid;

use super::data_dir;
use crate::error::{DatabaseError, Result};
use crate::journal::{Emotion, JournalEntry, NewJournalEntry};
use crate::repository::{JournalRepository, TipRepository};
use crate::tips::Tip;

const ENTRY_COLUMNS: &str = "id, user_id, title, content, date, image_urls, emotion";

/// Column values as stored, before validation.
struct RawEntry {
    id: String,
    user_id: String,
    title: String,
    content: String,
    date: String,
    image_urls: String,
    emotion: i64,
}

impl RawEntry {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            content: row.get(3)?,
            date: row.get(4)?,
            image_urls: row.get(5)?,
            emotion: row.get(6)?,
        })
    }

    /// Validate stored values. Rows that fail are logged and skipped so a
    /// single bad record never reaches the statistics.
    fn into_entry(self) -> Option<JournalEntry> {
        let Some(emotion) = Emotion::from_code(self.emotion) else {
            tracing::warn!(entry_id = %self.id, code = self.emotion, "skipping entry with unknown emotion");
            return None;
        };
        let date = match DateTime::parse_from_rfc3339(&self.date) {
            Ok(d) => d.with_timezone(&Utc),
            Err(e) => {
                tracing::warn!(entry_id = %self.id, error = %e, "skipping entry with invalid date");
                return None;
            }
        };
        let image_urls = serde_json::from_str(&self.image_urls).unwrap_or_else(|e| {
            tracing::warn!(entry_id = %self.id, error = %e, "ignoring malformed image list");
            Vec::new()
        });
        Some(JournalEntry {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            content: self.content,
            date,
            image_urls,
            emotion,
        })
    }
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// SQLite database for journal storage.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/digidiary/digidiary.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("digidiary.db");
        Self::open_at(&path)
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS journals (
                    id          TEXT PRIMARY KEY,
                    user_id     TEXT NOT NULL,
                    title       TEXT NOT NULL,
                    content     TEXT NOT NULL DEFAULT '',
                    date        TEXT NOT NULL,
                    image_urls  TEXT NOT NULL DEFAULT '[]',
                    emotion     INTEGER NOT NULL
                );

                CREATE TABLE IF NOT EXISTS tips (
                    id      TEXT PRIMARY KEY,
                    quote   TEXT NOT NULL,
                    author  TEXT
                );

                CREATE INDEX IF NOT EXISTS idx_journals_user_date ON journals(user_id, date);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Store a fully-formed entry, replacing any row with the same id.
    pub fn insert_entry(&self, entry: &JournalEntry) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO journals (id, user_id, title, content, date, image_urls, emotion)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entry.id,
                entry.user_id,
                entry.title,
                entry.content,
                format_date(&entry.date),
                serde_json::to_string(&entry.image_urls)?,
                entry.emotion.code(),
            ],
        )?;
        Ok(())
    }

    /// Create an entry for `user_id` with a fresh id.
    ///
    /// # Errors
    /// Returns a validation error for a blank title, or a database error if
    /// the insert fails.
    pub fn create_entry(&self, user_id: &str, draft: NewJournalEntry) -> Result<JournalEntry> {
        let entry = draft.into_entry(Uuid::new_v4().to_string(), user_id)?;
        self.insert_entry(&entry)?;
        tracing::info!(user_id, entry_id = %entry.id, "journal entry added");
        Ok(entry)
    }

    /// Entries owned by `user_id`, newest first.
    pub fn entries_for_user(&self, user_id: &str) -> Result<Vec<JournalEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS} FROM journals WHERE user_id = ?1 ORDER BY date DESC"
        ))?;
        let rows = stmt.query_map(params![user_id], RawEntry::from_row)?;

        let mut entries = Vec::new();
        for row in rows {
            if let Some(entry) = row?.into_entry() {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    pub fn get_entry(&self, id: &str) -> Result<Option<JournalEntry>> {
        let raw = self
            .conn
            .query_row(
                &format!("SELECT {ENTRY_COLUMNS} FROM journals WHERE id = ?1"),
                params![id],
                RawEntry::from_row,
            )
            .optional()?;
        Ok(raw.and_then(RawEntry::into_entry))
    }

    pub fn remove_entry(&self, id: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM journals WHERE id = ?1", params![id])?;
        if affected > 0 {
            tracing::info!(entry_id = id, "journal entry deleted");
        }
        Ok(affected > 0)
    }

    pub fn list_tips(&self) -> Result<Vec<Tip>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, quote, author FROM tips ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        })?;

        let mut tips = Vec::new();
        for row in rows {
            let (id, quote, author) = row?;
            tips.push(Tip::new(id, quote, author.as_deref()));
        }
        Ok(tips)
    }

    pub fn insert_tip(&self, tip: &Tip) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO tips (id, quote, author) VALUES (?1, ?2, ?3)",
            params![tip.id, tip.quote, tip.author],
        )?;
        Ok(())
    }

    /// Insert the starter quotes when the tips table is empty.
    ///
    /// Returns the number of tips inserted.
    pub fn seed_tips_if_empty(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tips", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(0);
        }
        let starter = Tip::starter_set();
        for tip in &starter {
            self.insert_tip(tip)?;
        }
        tracing::debug!(count = starter.len(), "seeded starter tips");
        Ok(starter.len())
    }
}

impl JournalRepository for Database {
    async fn fetch_entries(&self, user_id: &str) -> Result<Vec<JournalEntry>> {
        self.entries_for_user(user_id)
    }

    async fn fetch_entry(&self, id: &str) -> Result<Option<JournalEntry>> {
        self.get_entry(id)
    }

    async fn add_entry(&self, user_id: &str, draft: NewJournalEntry) -> Result<JournalEntry> {
        self.create_entry(user_id, draft)
    }

    async fn delete_entry(&self, id: &str) -> Result<bool> {
        self.remove_entry(id)
    }
}

impl TipRepository for Database {
    async fn fetch_tips(&self) -> Result<Vec<Tip>> {
        self.list_tips()
    }

    async fn add_tip(&self, quote: &str, author: Option<&str>) -> Result<Tip> {
        let tip = Tip::new(Uuid::new_v4().to_string(), quote, author);
        self.insert_tip(&tip)?;
        Ok(tip)
    }
}
