//! Entry store façade.
//!
//! Components that need journal data receive a repository explicitly rather
//! than reaching for a global client. Two implementations ship with the
//! crate: [`InMemoryRepository`] (with push updates) and the SQLite-backed
//! [`Database`](crate::storage::Database).

mod memory;

pub use memory::{InMemoryRepository, JournalFeed};

use crate::error::Result;
use crate::journal::{JournalEntry, NewJournalEntry};
use crate::tips::{pick_random, Tip};

/// Read/write access to journal entries.
#[allow(async_fn_in_trait)]
pub trait JournalRepository {
    /// All entries owned by `user_id`, in no particular order.
    async fn fetch_entries(&self, user_id: &str) -> Result<Vec<JournalEntry>>;

    async fn fetch_entry(&self, id: &str) -> Result<Option<JournalEntry>>;

    /// Store a new entry for `user_id` and return it with its assigned id.
    async fn add_entry(&self, user_id: &str, draft: NewJournalEntry) -> Result<JournalEntry>;

    /// Returns `false` when no entry had that id.
    async fn delete_entry(&self, id: &str) -> Result<bool>;
}

/// Access to the shared collection of motivational quotes.
#[allow(async_fn_in_trait)]
pub trait TipRepository {
    async fn fetch_tips(&self) -> Result<Vec<Tip>>;

    async fn add_tip(&self, quote: &str, author: Option<&str>) -> Result<Tip>;

    async fn fetch_random_tip(&self) -> Result<Option<Tip>> {
        let tips = self.fetch_tips().await?;
        Ok(pick_random(&tips, &mut rand::thread_rng()).cloned())
    }
}
