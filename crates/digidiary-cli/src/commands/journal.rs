//! Journal entry commands for CLI.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use clap::Subcommand;
use digidiary_core::{Emotion, JournalEntry, JournalRepository, NewJournalEntry, ValidationError};

use super::Session;

#[derive(Subcommand)]
pub enum JournalAction {
    /// Write a new entry
    Add {
        /// Entry title
        title: String,
        /// Entry body
        #[arg(long, default_value = "")]
        content: String,
        /// anger, excitement, happiness, serenity or sadness (default from config)
        #[arg(long)]
        emotion: Option<String>,
        /// Attached image URL
        #[arg(long)]
        image_url: Option<String>,
        /// RFC 3339 timestamp or YYYY-MM-DD (default: now)
        #[arg(long)]
        date: Option<String>,
    },
    /// List entries, newest first
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one entry
    Show {
        /// Entry ID
        id: String,
    },
    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },
}

/// Accept a full RFC 3339 timestamp or a bare local date (taken at noon).
fn parse_date(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ValidationError::invalid("date", format!("'{raw}' is neither RFC 3339 nor YYYY-MM-DD"))
    })?;
    let noon = day
        .and_hms_opt(12, 0, 0)
        .ok_or_else(|| ValidationError::invalid("date", "out of range"))?;
    Local
        .from_local_datetime(&noon)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| ValidationError::invalid("date", format!("'{raw}' does not exist locally")))
}

fn summary_line(entry: &JournalEntry) -> String {
    format!(
        "{}  {:<10}  {}  ({})",
        entry.date.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        entry.emotion.label(),
        entry.title,
        entry.id
    )
}

pub async fn run(action: JournalAction) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;
    let user_id = session.user_id();

    match action {
        JournalAction::Add {
            title,
            content,
            emotion,
            image_url,
            date,
        } => {
            let emotion = match emotion {
                Some(raw) => raw.parse::<Emotion>()?,
                None => session.config.journal.default_emotion,
            };
            let mut draft = NewJournalEntry::new(title, content, emotion);
            if let Some(url) = image_url {
                draft = draft.with_image_url(url);
            }
            if let Some(raw) = date {
                draft = draft.with_date(parse_date(&raw)?);
            }
            let entry = session.db.add_entry(&user_id, draft).await?;
            println!("Journal entry created: {}", entry.id);
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        JournalAction::List { json } => {
            let entries = session.db.fetch_entries(&user_id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No journal entries yet.");
            } else {
                for entry in &entries {
                    println!("{}", summary_line(entry));
                }
            }
        }
        JournalAction::Show { id } => {
            let entry = session
                .db
                .fetch_entry(&id)
                .await?
                .filter(|e| e.user_id == user_id)
                .ok_or_else(|| ValidationError::NotFound {
                    kind: "Journal entry".into(),
                    id: id.clone(),
                })?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        JournalAction::Delete { id } => {
            let owned = session
                .db
                .fetch_entry(&id)
                .await?
                .is_some_and(|e| e.user_id == user_id);
            if !owned || !session.db.delete_entry(&id).await? {
                return Err(ValidationError::NotFound {
                    kind: "Journal entry".into(),
                    id,
                }
                .into());
            }
            println!("Journal entry deleted: {id}");
        }
    }
    Ok(())
}
