pub mod completions;
pub mod config;
pub mod journal;
pub mod stats;
pub mod tip;

use digidiary_core::{Config, Database};

/// Configuration and storage shared by the journal commands.
pub struct Session {
    pub config: Config,
    pub db: Database,
}

impl Session {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let db = Database::open()?;
        tracing::debug!(user_id = %config.profile.user_id, "session opened");
        Ok(Self { config, db })
    }

    pub fn user_id(&self) -> String {
        self.config.profile.user_id.clone()
    }
}
