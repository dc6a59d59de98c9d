//! # DigiDiary Core Library
//!
//! This library provides the core logic for the DigiDiary journal. The
//! command-line tool is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Journal**: entries tagged with one of five emotions
//! - **Statistics**: pure streak / frequency / weekly-average computation
//!   over an already-fetched entry list
//! - **Repository**: the entry store façade, injected into whatever needs
//!   journal data (in-memory with push updates, or SQLite)
//! - **Storage**: SQLite journal storage and TOML configuration
//!
//! ## Key Components
//!
//! - [`compute_statistics`]: the statistics engine
//! - [`StatsService`]: fetch from a repository, then compute
//! - [`Database`]: SQLite-backed repository
//! - [`Config`]: application configuration management

pub mod error;
pub mod journal;
pub mod repository;
pub mod service;
pub mod stats;
pub mod storage;
pub mod tips;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use journal::{Emotion, JournalEntry, NewJournalEntry};
pub use repository::{InMemoryRepository, JournalFeed, JournalRepository, TipRepository};
pub use service::{watch_statistics, watch_statistics_at, StatsService};
pub use stats::{compute_statistics, compute_statistics_at, HomeSummary, StreakStatistics};
pub use storage::{Config, Database};
pub use tips::Tip;
