use chrono::{Local, Utc};
use digidiary_core::stats::format_day_count;
use digidiary_core::{HomeSummary, StatsService, StreakStatistics};

use super::Session;

fn print_statistics(stats: &StreakStatistics) {
    println!("Current streak:      {}", format_day_count(stats.current_streak));
    println!("Longest streak:      {}", format_day_count(stats.longest_streak));
    println!("Total entries:       {}", stats.total_entries);
    println!("Most common emotion: {}", stats.most_common_emotion);
    println!("Entries per week:    {}", stats.entries_per_week_display());
    let last = stats
        .last_entry_date
        .map(|d| d.with_timezone(&Local).format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("Last entry:          {last}");
}

fn print_home(summary: &HomeSummary) {
    println!("Streak:       {}", format_day_count(summary.current_streak));
    println!("Recent mood:  {}", summary.recent_mood);
    println!(
        "Latest entry: {} ({}, {})",
        summary.latest_title,
        summary.latest_emotion,
        summary.latest_date.with_timezone(&Local).format("%b %-d, %Y")
    );
}

pub async fn run_stats(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;
    let user_id = session.user_id();
    let use_utc = session.config.stats.use_utc;
    let service = StatsService::new(session.db);

    let stats = if use_utc {
        service.statistics_at(&user_id, Utc::now()).await?
    } else {
        service.statistics(&user_id).await?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_statistics(&stats);
    }
    Ok(())
}

pub async fn run_home(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;
    let user_id = session.user_id();
    let window = session.config.stats.recent_window;
    let use_utc = session.config.stats.use_utc;
    let service = StatsService::new(session.db);

    let summary = if use_utc {
        service.home_summary_at(&user_id, Utc::now(), window).await?
    } else {
        service.home_summary(&user_id, window).await?
    };

    match (summary, json) {
        (summary, true) => println!("{}", serde_json::to_string_pretty(&summary)?),
        (Some(summary), false) => print_home(&summary),
        (None, false) => println!("No journal entries yet. Write your first one!"),
    }
    Ok(())
}
