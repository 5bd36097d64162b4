// Service exports
pub mod announcer;
pub mod history;
pub mod roster;

pub use announcer::{Announcer, ConsoleAnnouncer};
pub use history::{HistoryError, HistoryProvider, JsonHistoryStore, NoHistory, RecordedRound};
pub use roster::{FileRoster, RosterProvider, StaticRoster};
