use std::fs;
use std::path::PathBuf;

use crate::models::Member;

/// Supplies the member roster for the current round.
///
/// Contract: returns an empty sequence when the roster is unknown.
/// Implementations absorb and log their own failures rather than raising
/// into the pairing logic; a real messaging-gateway implementation also owns
/// bot/service-account filtering.
pub trait RosterProvider {
    fn get_members(&self) -> Vec<Member>;
}

/// Roster backed by a plain-text file, one member identifier per line.
///
/// Blank lines and `#` comments are ignored; entries are trimmed and
/// de-duplicated keeping the first occurrence.
#[derive(Debug, Clone)]
pub struct FileRoster {
    path: PathBuf,
}

impl FileRoster {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse(contents: &str) -> Vec<Member> {
        let mut members: Vec<Member> = Vec::new();

        for line in contents.lines() {
            let entry = line.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            if !members.iter().any(|m| m == entry) {
                members.push(entry.to_string());
            }
        }

        members
    }
}

impl RosterProvider for FileRoster {
    fn get_members(&self) -> Vec<Member> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let members = Self::parse(&contents);
                tracing::debug!(
                    "Loaded {} members from {}",
                    members.len(),
                    self.path.display()
                );
                members
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to read roster file {}, proceeding with an empty roster: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }
}

/// Fixed in-memory roster, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct StaticRoster {
    members: Vec<Member>,
}

impl StaticRoster {
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }
}

impl RosterProvider for StaticRoster {
    fn get_members(&self) -> Vec<Member> {
        self.members.clone()
    }
}
