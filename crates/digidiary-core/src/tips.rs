//! Motivational quotes shown alongside the journal.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Author shown for quotes without attribution.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    pub id: String,
    pub quote: String,
    pub author: String,
}

impl Tip {
    pub fn new(id: impl Into<String>, quote: impl Into<String>, author: Option<&str>) -> Self {
        let author = author
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR);
        Self {
            id: id.into(),
            quote: quote.into(),
            author: author.to_string(),
        }
    }

    /// Quotes used to seed an empty tip collection.
    pub fn starter_set() -> Vec<Tip> {
        [
            ("Fill your paper with the breathings of your heart.", Some("William Wordsworth")),
            ("Journal writing is a voyage to the interior.", Some("Christina Baldwin")),
            ("Small steps every day add up to big results.", None),
            ("What we write down, we remember; what we remember, we can change.", None),
            ("Keep a diary, and someday it'll keep you.", Some("Mae West")),
        ]
        .into_iter()
        .enumerate()
        .map(|(idx, (quote, author))| Tip::new(format!("starter-{}", idx + 1), quote, author))
        .collect()
    }
}

/// Uniformly pick one tip, or `None` when there are none.
pub fn pick_random<'a, R: Rng + ?Sized>(tips: &'a [Tip], rng: &mut R) -> Option<&'a Tip> {
    tips.choose(rng)
}
