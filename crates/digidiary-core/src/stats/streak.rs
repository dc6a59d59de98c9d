//! Journaling streaks and aggregate statistics.
//!
//! Everything here is a pure function of the entry slice and a reference
//! instant. Timestamps are projected onto calendar days in the reference
//! instant's time zone before any streak arithmetic, so several entries on
//! one day count once for streaks but individually for totals and emotion
//! frequencies.
//!
//! Weekly averages bucket days by ISO-8601 week (Monday start, ISO
//! week-year), so late-December days may belong to week 1 of the next year.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::journal::{Emotion, JournalEntry};

/// Emotion reported when there is nothing to count.
pub const FALLBACK_EMOTION: Emotion = Emotion::Happiness;

/// Display-ready statistics for one user's journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakStatistics {
    /// Consecutive journaled days ending today, or yesterday if today has
    /// no entry yet
    pub current_streak: u32,
    /// Longest run of consecutive journaled days ever
    pub longest_streak: u32,
    /// Number of entries, duplicates on the same day included
    pub total_entries: usize,
    pub most_common_emotion: Emotion,
    /// Entries divided by the number of distinct ISO weeks touched
    pub entries_per_week: f64,
    /// Latest entry timestamp, not truncated to the day
    pub last_entry_date: Option<DateTime<Utc>>,
}

impl Default for StreakStatistics {
    fn default() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            total_entries: 0,
            most_common_emotion: FALLBACK_EMOTION,
            entries_per_week: 0.0,
            last_entry_date: None,
        }
    }
}

impl StreakStatistics {
    /// Weekly average rounded to one decimal, e.g. `"2.5"`.
    pub fn entries_per_week_display(&self) -> String {
        format!("{:.1}", self.entries_per_week)
    }
}

/// Render a day count as `"1 day"` / `"N days"`.
pub fn format_day_count(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

/// Compute statistics against the system clock and local calendar.
pub fn compute_statistics(entries: &[JournalEntry]) -> StreakStatistics {
    compute_statistics_at(entries, Local::now())
}

/// Compute statistics relative to `now`, using `now`'s time zone as the
/// calendar for day and week projection.
pub fn compute_statistics_at<Tz: TimeZone>(
    entries: &[JournalEntry],
    now: DateTime<Tz>,
) -> StreakStatistics {
    if entries.is_empty() {
        return StreakStatistics::default();
    }

    let tz = now.timezone();
    let days = day_set(entries, &tz);
    let today = now.date_naive();

    let total_entries = entries.len();
    let weeks: HashSet<(i32, u32)> = days
        .iter()
        .map(|day| {
            let week = day.iso_week();
            (week.year(), week.week())
        })
        .collect();

    StreakStatistics {
        current_streak: current_streak_from(&days, today),
        longest_streak: longest_streak_from(&days),
        total_entries,
        most_common_emotion: most_common_emotion(entries.iter().map(|e| e.emotion))
            .unwrap_or(FALLBACK_EMOTION),
        entries_per_week: total_entries as f64 / weeks.len() as f64,
        last_entry_date: entries.iter().map(|e| e.date).max(),
    }
}

/// Calendar day of `date` as seen in `tz`.
pub fn local_day<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    date.with_timezone(tz).date_naive()
}

/// Distinct calendar days on which at least one entry was written.
pub fn day_set<Tz: TimeZone>(entries: &[JournalEntry], tz: &Tz) -> HashSet<NaiveDate> {
    entries.iter().map(|e| local_day(&e.date, tz)).collect()
}

/// Length of the run ending at `today`, or at yesterday when today has no
/// entry. Zero when neither day is journaled.
pub fn current_streak_from(days: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let start = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    let mut day = Some(start);
    while let Some(d) = day.filter(|d| days.contains(d)) {
        streak += 1;
        day = d.pred_opt();
    }
    streak
}

/// Longest run of consecutive days in `days`.
///
/// Runs are only walked from their first day (a day whose predecessor is
/// absent), so each day is visited at most twice.
pub fn longest_streak_from(days: &HashSet<NaiveDate>) -> u32 {
    days.iter()
        .filter(|d| d.pred_opt().map_or(true, |prev| !days.contains(&prev)))
        .map(|&start| {
            let mut len = 0;
            let mut day = Some(start);
            while let Some(d) = day.filter(|d| days.contains(d)) {
                len += 1;
                day = d.succ_opt();
            }
            len
        })
        .max()
        .unwrap_or(0)
}

/// Most frequent emotion, or `None` for an empty input.
///
/// Ties go to the emotion with the lowest ordinal (Anger first).
pub fn most_common_emotion<I>(emotions: I) -> Option<Emotion>
where
    I: IntoIterator<Item = Emotion>,
{
    let mut counts = [0usize; Emotion::ALL.len()];
    for emotion in emotions {
        counts[emotion.code() as usize - 1] += 1;
    }

    let mut best: Option<(Emotion, usize)> = None;
    for emotion in Emotion::ALL {
        let count = counts[emotion.code() as usize - 1];
        if count == 0 {
            continue;
        }
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((emotion, count)),
        }
    }
    best.map(|(emotion, _)| emotion)
}
