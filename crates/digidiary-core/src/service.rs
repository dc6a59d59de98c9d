//! Fetch-then-compute glue between a repository and the statistics engine.

use chrono::{DateTime, Local, TimeZone};

use crate::error::Result;
use crate::repository::{JournalFeed, JournalRepository};
use crate::stats::{self, HomeSummary, StreakStatistics};

/// Computes statistics for users of an injected repository.
pub struct StatsService<R> {
    repo: R,
}

impl<R: JournalRepository> StatsService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Statistics for `user_id` against the local clock.
    pub async fn statistics(&self, user_id: &str) -> Result<StreakStatistics> {
        self.statistics_at(user_id, Local::now()).await
    }

    /// Statistics for `user_id` relative to `now`.
    pub async fn statistics_at<Tz: TimeZone>(
        &self,
        user_id: &str,
        now: DateTime<Tz>,
    ) -> Result<StreakStatistics> {
        let entries = self.repo.fetch_entries(user_id).await?;
        tracing::debug!(user_id, entries = entries.len(), "computing journal statistics");
        Ok(stats::compute_statistics_at(&entries, now))
    }

    pub async fn home_summary(&self, user_id: &str, window: usize) -> Result<Option<HomeSummary>> {
        self.home_summary_at(user_id, Local::now(), window).await
    }

    pub async fn home_summary_at<Tz: TimeZone>(
        &self,
        user_id: &str,
        now: DateTime<Tz>,
        window: usize,
    ) -> Result<Option<HomeSummary>> {
        let entries = self.repo.fetch_entries(user_id).await?;
        tracing::debug!(user_id, entries = entries.len(), window, "computing home summary");
        Ok(stats::home_summary_at(&entries, now, window))
    }
}

/// Recompute statistics for every snapshot delivered by `feed` until the
/// feed closes, against the local clock. Returns the number of snapshots
/// processed.
pub async fn watch_statistics<F>(feed: &mut JournalFeed, on_update: F) -> usize
where
    F: FnMut(StreakStatistics),
{
    watch_statistics_at(feed, Local::now, on_update).await
}

/// Like [`watch_statistics`], but each snapshot is measured against the
/// instant returned by `clock`, whose time zone is the calendar.
pub async fn watch_statistics_at<Tz, C, F>(
    feed: &mut JournalFeed,
    mut clock: C,
    mut on_update: F,
) -> usize
where
    Tz: TimeZone,
    C: FnMut() -> DateTime<Tz>,
    F: FnMut(StreakStatistics),
{
    let mut delivered = 0;
    while let Some(entries) = feed.next_snapshot().await {
        tracing::debug!(
            user_id = feed.user_id(),
            entries = entries.len(),
            "journal snapshot received"
        );
        on_update(stats::compute_statistics_at(&entries, clock()));
        delivered += 1;
    }
    delivered
}
