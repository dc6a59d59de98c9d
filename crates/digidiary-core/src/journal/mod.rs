//! Journal entries and the emotion tag attached to each of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Mood recorded with a journal entry.
///
/// The discriminants are the persisted codes and define the ordinal order
/// used to break frequency ties. Serialized lowercase; deserialization
/// accepts any casing of the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Emotion {
    Anger = 1,
    Excitement = 2,
    Happiness = 3,
    Serenity = 4,
    Sadness = 5,
}

impl Emotion {
    pub const ALL: [Emotion; 5] = [
        Emotion::Anger,
        Emotion::Excitement,
        Emotion::Happiness,
        Emotion::Serenity,
        Emotion::Sadness,
    ];

    /// Stored integer code (1..=5).
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: i64) -> Option<Emotion> {
        match code {
            1 => Some(Emotion::Anger),
            2 => Some(Emotion::Excitement),
            3 => Some(Emotion::Happiness),
            4 => Some(Emotion::Serenity),
            5 => Some(Emotion::Sadness),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Emotion::Anger => "Anger",
            Emotion::Excitement => "Excitement",
            Emotion::Happiness => "Happiness",
            Emotion::Serenity => "Serenity",
            Emotion::Sadness => "Sadness",
        }
    }
}

impl Default for Emotion {
    fn default() -> Self {
        Emotion::Serenity
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Emotion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Emotion::ALL
            .into_iter()
            .find(|e| e.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ValidationError::invalid(
                    "emotion",
                    format!("'{wanted}' is not one of anger, excitement, happiness, serenity, sadness"),
                )
            })
    }
}

impl<'de> Deserialize<'de> for Emotion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single diary record.
///
/// Only `date` and `emotion` feed the statistics; the rest is carried
/// through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub emotion: Emotion,
}

/// Fields supplied by the author when creating an entry.
///
/// The store assigns the id and the owning user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewJournalEntry {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub emotion: Emotion,
    /// Defaults to the time of insertion.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl NewJournalEntry {
    pub fn new(title: impl Into<String>, content: impl Into<String>, emotion: Emotion) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image_urls: Vec::new(),
            emotion,
            date: None,
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        if !url.trim().is_empty() {
            self.image_urls.push(url);
        }
        self
    }

    /// Materialize into a stored entry for `user_id`.
    ///
    /// # Errors
    /// Returns an error if the title is blank.
    pub fn into_entry(self, id: String, user_id: &str) -> Result<JournalEntry, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::invalid("title", "must not be empty"));
        }
        Ok(JournalEntry {
            id,
            user_id: user_id.to_string(),
            title: self.title,
            content: self.content,
            date: self.date.unwrap_or_else(Utc::now),
            image_urls: self.image_urls,
            emotion: self.emotion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_ordinals() {
        for (idx, emotion) in Emotion::ALL.iter().enumerate() {
            assert_eq!(emotion.code() as usize, idx + 1);
            assert_eq!(Emotion::from_code(emotion.code() as i64), Some(*emotion));
        }
        assert_eq!(Emotion::from_code(0), None);
        assert_eq!(Emotion::from_code(6), None);
    }

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("anger".parse::<Emotion>().unwrap(), Emotion::Anger);
        assert_eq!(" SERENITY ".parse::<Emotion>().unwrap(), Emotion::Serenity);
        assert!("boredom".parse::<Emotion>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Emotion::Excitement).unwrap();
        assert_eq!(json, "\"excitement\"");
        assert_eq!(Emotion::Sadness.to_string(), "Sadness");
    }

    #[test]
    fn deserializes_any_label_casing() {
        let parsed: Vec<Emotion> =
            serde_json::from_str(r#"["sadness", "Sadness", "SADNESS", "Anger"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![Emotion::Sadness, Emotion::Sadness, Emotion::Sadness, Emotion::Anger]
        );
        assert!(serde_json::from_str::<Emotion>("\"boredom\"").is_err());
    }

    #[test]
    fn default_emotion_is_serenity() {
        assert_eq!(Emotion::default(), Emotion::Serenity);
        assert_eq!(NewJournalEntry::default().emotion, Emotion::Serenity);
    }

    #[test]
    fn blank_title_is_rejected() {
        let draft = NewJournalEntry::new("   ", "body", Emotion::Happiness);
        let err = draft.into_entry("id-1".into(), "alice").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "title"));
    }

    #[test]
    fn into_entry_keeps_explicit_date() {
        let date = "2025-04-23T08:30:00Z".parse::<DateTime<Utc>>().unwrap();
        let entry = NewJournalEntry::new("Morning", "walked", Emotion::Serenity)
            .with_date(date)
            .with_image_url("")
            .with_image_url("https://example.com/a.png")
            .into_entry("id-2".into(), "alice")
            .unwrap();
        assert_eq!(entry.date, date);
        assert_eq!(entry.user_id, "alice");
        assert_eq!(entry.image_urls, vec!["https://example.com/a.png".to_string()]);
    }
}
