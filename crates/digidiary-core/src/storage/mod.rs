mod config;
pub mod database;

pub use config::{Config, JournalConfig, ProfileConfig, StatsConfig};
pub use database::Database;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/digidiary[-dev]/` based on DIGIDIARY_ENV.
///
/// Set DIGIDIARY_ENV=dev to use the development data directory, or
/// DIGIDIARY_DATA_DIR to point at an explicit directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("DIGIDIARY_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("DIGIDIARY_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("digidiary-dev")
            } else {
                base_dir.join("digidiary")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
