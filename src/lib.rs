//! Coffee Roulette - Constrained-random coffee pairing engine
//!
//! This library pairs up the members of a workspace group for one-on-one
//! coffee chats, avoiding combinations that already met within a configurable
//! lookback window.

pub mod config;
pub mod core;
pub mod models;
pub mod runner;
pub mod services;

// Re-export commonly used types
pub use config::Settings;
pub use core::{ExclusionIndex, Pairer, PairingError, SingletonPolicy};
pub use models::{Member, Pair, PairingRound};
pub use runner::{RoundError, RoundRunner};
pub use services::{
    Announcer, ConsoleAnnouncer, FileRoster, HistoryError, HistoryProvider, JsonHistoryStore,
    NoHistory, RecordedRound, RosterProvider, StaticRoster,
};
