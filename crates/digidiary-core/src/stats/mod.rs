//! Journal statistics
//!
//! - [`streak`]: current/longest streak, emotion frequency, weekly average
//! - [`summary`]: the condensed view shown on the home screen

pub mod streak;
pub mod summary;

pub use streak::{
    compute_statistics, compute_statistics_at, current_streak_from, day_set,
    format_day_count, local_day, longest_streak_from, most_common_emotion, StreakStatistics,
    FALLBACK_EMOTION,
};

pub use summary::{home_summary, home_summary_at, HomeSummary, DEFAULT_RECENT_WINDOW};
