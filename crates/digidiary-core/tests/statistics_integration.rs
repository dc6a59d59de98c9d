//! Integration tests for journal statistics.
//!
//! Covers the full path from stored entries to computed statistics, plus
//! property checks of the streak invariants over arbitrary journals.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use digidiary_core::stats::{day_set, longest_streak_from};
use digidiary_core::{
    compute_statistics_at, Database, Emotion, InMemoryRepository, JournalEntry, JournalRepository,
    NewJournalEntry, StatsService, StreakStatistics,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn now() -> DateTime<Utc> {
    "2026-03-18T12:00:00Z".parse().unwrap()
}

fn entry(id: usize, date: DateTime<Utc>, emotion: Emotion) -> JournalEntry {
    JournalEntry {
        id: format!("entry-{id}"),
        user_id: "alice".into(),
        title: format!("Entry {id}"),
        content: String::new(),
        date,
        image_urls: Vec::new(),
        emotion,
    }
}

/// Reference form: walk back from every journaled day.
fn naive_longest(days: &HashSet<NaiveDate>) -> u32 {
    days.iter()
        .map(|&start| {
            let mut len = 0;
            let mut day = start;
            while days.contains(&day) {
                len += 1;
                day = day.pred_opt().unwrap();
            }
            len
        })
        .max()
        .unwrap_or(0)
}

#[tokio::test]
async fn test_full_statistics_workflow_sqlite() {
    let db = Database::open_memory().unwrap();
    let base = now();

    // Three-day run ending today with a duplicate today, then an older pair.
    let plan = [
        (0, Emotion::Anger),
        (0, Emotion::Happiness),
        (1, Emotion::Anger),
        (2, Emotion::Serenity),
        (9, Emotion::Sadness),
        (10, Emotion::Sadness),
    ];
    for (days_ago, emotion) in plan {
        let draft = NewJournalEntry::new("day", "text", emotion)
            .with_date(base - Duration::days(days_ago) - Duration::hours(1));
        db.add_entry("alice", draft).await.unwrap();
    }
    db.add_entry(
        "bob",
        NewJournalEntry::new("other user", "", Emotion::Excitement).with_date(base),
    )
    .await
    .unwrap();

    let service = StatsService::new(db);
    let stats = service.statistics_at("alice", base).await.unwrap();

    assert_eq!(stats.current_streak, 3);
    assert_eq!(stats.longest_streak, 3);
    assert_eq!(stats.total_entries, 6);
    // Anger and Sadness tie at two; Anger has the lower ordinal.
    assert_eq!(stats.most_common_emotion, Emotion::Anger);
    // Sunday Mar 8 and Monday Mar 9 fall in different ISO weeks: 6 / 3.
    assert_eq!(stats.entries_per_week, 2.0);
    assert_eq!(stats.last_entry_date, Some(base - Duration::hours(1)));
}

#[tokio::test]
async fn test_yesterday_keeps_streak_alive() {
    let base = now();
    let repo = InMemoryRepository::with_entries(vec![
        entry(1, base - Duration::days(1), Emotion::Serenity),
        entry(2, base - Duration::days(2), Emotion::Serenity),
    ]);
    let service = StatsService::new(repo);

    let stats = service.statistics_at("alice", base).await.unwrap();
    assert_eq!(stats.current_streak, 2);

    let two_days_later = service
        .statistics_at("alice", base + Duration::days(2))
        .await
        .unwrap();
    assert_eq!(two_days_later.current_streak, 0);
    assert_eq!(two_days_later.longest_streak, 2);
}

#[tokio::test]
async fn test_home_summary_from_sqlite() {
    let db = Database::open_memory().unwrap();
    let base = now();
    for (i, emotion) in [Emotion::Sadness, Emotion::Serenity, Emotion::Serenity]
        .into_iter()
        .enumerate()
    {
        let draft = NewJournalEntry::new(format!("note {i}"), "", emotion)
            .with_date(base - Duration::hours(10 - i as i64));
        db.add_entry("alice", draft).await.unwrap();
    }

    let service = StatsService::new(db);
    let summary = service
        .home_summary_at("alice", base, 5)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(summary.current_streak, 1);
    assert_eq!(summary.recent_mood, Emotion::Serenity);
    assert_eq!(summary.latest_title, "note 2");
}

#[test]
fn test_eight_entries_over_four_weeks() {
    // Mondays and Tuesdays of four consecutive ISO weeks.
    let monday = "2026-02-23T09:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let entries: Vec<_> = (0..4)
        .flat_map(|week| {
            let start = monday + Duration::weeks(week);
            [start, start + Duration::days(1)]
        })
        .enumerate()
        .map(|(i, date)| entry(i, date, Emotion::Happiness))
        .collect();

    let stats = compute_statistics_at(&entries, now());
    assert_eq!(stats.total_entries, 8);
    assert_eq!(stats.entries_per_week, 2.0);
}

#[test]
fn test_empty_journal_defaults() {
    let stats = compute_statistics_at(&[], now());
    assert_eq!(
        stats,
        StreakStatistics {
            current_streak: 0,
            longest_streak: 0,
            total_entries: 0,
            most_common_emotion: Emotion::Happiness,
            entries_per_week: 0.0,
            last_entry_date: None,
        }
    );
}

fn arb_journal() -> impl Strategy<Value = Vec<JournalEntry>> {
    prop::collection::vec((0i64..120, 0i64..24, 0usize..5), 0..80).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (days_ago, hour, emotion))| {
                let date = now() - Duration::days(days_ago) - Duration::hours(hour % 12);
                entry(i, date, Emotion::ALL[emotion])
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_streak_ordering(entries in arb_journal()) {
        let stats = compute_statistics_at(&entries, now());
        prop_assert!(stats.longest_streak >= stats.current_streak);
        prop_assert_eq!(stats.total_entries, entries.len());
        prop_assert_eq!(stats.last_entry_date, entries.iter().map(|e| e.date).max());
        if !entries.is_empty() {
            prop_assert!(stats.entries_per_week >= 1.0);
        }
    }

    #[test]
    fn prop_idempotent_and_order_independent(entries in arb_journal()) {
        let first = compute_statistics_at(&entries, now());
        let second = compute_statistics_at(&entries, now());
        prop_assert_eq!(&first, &second);

        let mut reversed = entries.clone();
        reversed.reverse();
        prop_assert_eq!(&first, &compute_statistics_at(&reversed, now()));
    }

    #[test]
    fn prop_linear_longest_matches_naive(entries in arb_journal()) {
        let days = day_set(&entries, &Utc);
        prop_assert_eq!(longest_streak_from(&days), naive_longest(&days));
    }
}
