//! Home screen summary: streak, recent mood and the latest entry.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::streak::{current_streak_from, day_set, most_common_emotion};
use crate::journal::{Emotion, JournalEntry};

/// Default number of recent entries considered for the recent mood.
pub const DEFAULT_RECENT_WINDOW: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeSummary {
    /// Same rule as the statistics engine: a run ending yesterday counts
    pub current_streak: u32,
    /// Most frequent emotion among the most recent entries
    pub recent_mood: Emotion,
    pub latest_title: String,
    pub latest_date: DateTime<Utc>,
    pub latest_emotion: Emotion,
}

pub fn home_summary(entries: &[JournalEntry], window: usize) -> Option<HomeSummary> {
    home_summary_at(entries, Local::now(), window)
}

/// Summarize `entries` relative to `now`.
///
/// Returns `None` when there are no entries. A `window` of zero is treated
/// as one so the latest entry always contributes.
pub fn home_summary_at<Tz: TimeZone>(
    entries: &[JournalEntry],
    now: DateTime<Tz>,
    window: usize,
) -> Option<HomeSummary> {
    let mut newest_first: Vec<&JournalEntry> = entries.iter().collect();
    newest_first.sort_by(|a, b| b.date.cmp(&a.date));
    let latest = *newest_first.first()?;

    let recent_mood = most_common_emotion(
        newest_first
            .iter()
            .take(window.max(1))
            .map(|e| e.emotion),
    )
    .unwrap_or(latest.emotion);

    let tz = now.timezone();
    let days = day_set(entries, &tz);

    Some(HomeSummary {
        current_streak: current_streak_from(&days, now.date_naive()),
        recent_mood,
        latest_title: latest.title.clone(),
        latest_date: latest.date,
        latest_emotion: latest.emotion,
    })
}
