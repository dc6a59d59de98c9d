//! In-process entry store with snapshot subscriptions.

use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use uuid::Uuid;

use super::{JournalRepository, TipRepository};
use crate::error::{CoreError, Result};
use crate::journal::{JournalEntry, NewJournalEntry};
use crate::tips::Tip;

type Snapshot = Arc<Vec<JournalEntry>>;

/// Thread-safe in-memory repository.
///
/// Every change to the entry list publishes a fresh snapshot to all
/// [`JournalFeed`]s created by [`subscribe`](Self::subscribe).
pub struct InMemoryRepository {
    entries: RwLock<Vec<JournalEntry>>,
    tips: RwLock<Vec<Tip>>,
    updates: watch::Sender<Snapshot>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        let (updates, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            entries: RwLock::new(Vec::new()),
            tips: RwLock::new(Vec::new()),
            updates,
        }
    }
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `entries`.
    pub fn with_entries(entries: Vec<JournalEntry>) -> Self {
        let (updates, _) = watch::channel(Arc::new(entries.clone()));
        Self {
            entries: RwLock::new(entries),
            tips: RwLock::new(Vec::new()),
            updates,
        }
    }

    /// Insert an already-materialized entry, replacing one with the same id.
    pub fn insert(&self, entry: JournalEntry) -> Result<()> {
        self.mutate(|entries| {
            entries.retain(|e| e.id != entry.id);
            entries.push(entry);
        })
    }

    /// Listen for snapshots of `user_id`'s entries.
    pub fn subscribe(&self, user_id: &str) -> JournalFeed {
        JournalFeed {
            user_id: user_id.to_string(),
            rx: self.updates.subscribe(),
            last: None,
        }
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut Vec<JournalEntry>) -> T) -> Result<T> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        let out = f(&mut entries);
        self.updates.send_replace(Arc::new(entries.clone()));
        Ok(out)
    }
}

fn poisoned() -> CoreError {
    CoreError::Custom("in-memory repository lock poisoned".to_string())
}

impl JournalRepository for InMemoryRepository {
    async fn fetch_entries(&self, user_id: &str) -> Result<Vec<JournalEntry>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn fetch_entry(&self, id: &str) -> Result<Option<JournalEntry>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.iter().find(|e| e.id == id).cloned())
    }

    async fn add_entry(&self, user_id: &str, draft: NewJournalEntry) -> Result<JournalEntry> {
        let entry = draft.into_entry(Uuid::new_v4().to_string(), user_id)?;
        self.insert(entry.clone())?;
        tracing::info!(user_id, entry_id = %entry.id, "journal entry added");
        Ok(entry)
    }

    async fn delete_entry(&self, id: &str) -> Result<bool> {
        let removed = self.mutate(|entries| {
            let before = entries.len();
            entries.retain(|e| e.id != id);
            entries.len() != before
        })?;
        if removed {
            tracing::info!(entry_id = id, "journal entry deleted");
        }
        Ok(removed)
    }
}

impl TipRepository for InMemoryRepository {
    async fn fetch_tips(&self) -> Result<Vec<Tip>> {
        Ok(self.tips.read().map_err(|_| poisoned())?.clone())
    }

    async fn add_tip(&self, quote: &str, author: Option<&str>) -> Result<Tip> {
        let tip = Tip::new(Uuid::new_v4().to_string(), quote, author);
        self.tips.write().map_err(|_| poisoned())?.push(tip.clone());
        Ok(tip)
    }
}

/// Stream of entry snapshots for one user.
///
/// The first call to [`next_snapshot`](Self::next_snapshot) yields the
/// current state immediately; later calls wait for the next change to this
/// user's entries. Only the latest state is delivered, so rapid successive
/// changes may collapse into one snapshot. Dropping the feed detaches it.
pub struct JournalFeed {
    user_id: String,
    rx: watch::Receiver<Snapshot>,
    last: Option<Vec<JournalEntry>>,
}

impl JournalFeed {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Next snapshot, or `None` once the repository has been dropped.
    pub async fn next_snapshot(&mut self) -> Option<Vec<JournalEntry>> {
        let mut current = self.take_current();
        if self.last.is_some() {
            // other users' changes leave this view untouched
            while self.last.as_ref() == Some(&current) {
                self.rx.changed().await.ok()?;
                current = self.take_current();
            }
        }
        self.last = Some(current.clone());
        Some(current)
    }

    fn take_current(&mut self) -> Vec<JournalEntry> {
        self.rx
            .borrow_and_update()
            .iter()
            .filter(|e| e.user_id == self.user_id)
            .cloned()
            .collect()
    }
}
