use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Pair, PairingRound};

/// Errors that can occur when persisting rounds
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Supplies previously announced rounds and records new ones.
///
/// The supply side returns `None` when no history exists or none is found;
/// parsing and I/O failures are absorbed and surfaced as "no history",
/// never as pairing errors. Recording failures do propagate: a round the
/// store cannot remember would silently weaken every later exclusion.
pub trait HistoryProvider {
    fn get_recent_rounds(&self) -> Option<Vec<PairingRound>>;

    fn record_round(&mut self, round: &PairingRound) -> Result<(), HistoryError>;
}

/// A round as persisted in the history store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedRound {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub pairs: Vec<Pair>,
}

impl RecordedRound {
    pub fn new(round: &PairingRound) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            pairs: round.pairs.clone(),
        }
    }
}

/// Append-only JSON-lines store of recorded rounds.
///
/// Each line is one serialized [`RecordedRound`]. Reads keep only records
/// inside the lookback window; lines that fail to decode are skipped with a
/// warning so one damaged record cannot blank out the whole history.
#[derive(Debug, Clone)]
pub struct JsonHistoryStore {
    path: PathBuf,
    lookback_days: u32,
}

impl JsonHistoryStore {
    pub fn new(path: impl Into<PathBuf>, lookback_days: u32) -> Self {
        Self {
            path: path.into(),
            lookback_days,
        }
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    /// All decodable records on file, oldest first. A missing file is an
    /// empty store, not an error.
    pub fn load_recorded(&self) -> Result<Vec<RecordedRound>, HistoryError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<RecordedRound>(&line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(
                        "Skipping undecodable history line {} in {}: {}",
                        number + 1,
                        self.path.display(),
                        e
                    );
                }
            }
        }

        Ok(records)
    }

    fn recent_records(&self) -> Result<Vec<RecordedRound>, HistoryError> {
        let cutoff = Utc::now() - Duration::days(i64::from(self.lookback_days));
        Ok(self
            .load_recorded()?
            .into_iter()
            .filter(|record| record.generated_at >= cutoff)
            .collect())
    }
}

impl HistoryProvider for JsonHistoryStore {
    fn get_recent_rounds(&self) -> Option<Vec<PairingRound>> {
        match self.recent_records() {
            Ok(records) if records.is_empty() => None,
            Ok(records) => Some(
                records
                    .into_iter()
                    .map(|record| PairingRound::new(record.pairs))
                    .collect(),
            ),
            Err(e) => {
                tracing::warn!(
                    "Failed to load history from {}, proceeding without exclusions: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    fn record_round(&mut self, round: &PairingRound) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let record = RecordedRound::new(round);
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        tracing::info!("Recorded round {} with {} pairs", record.id, record.pairs.len());
        Ok(())
    }
}

/// Provider that never finds history and drops recorded rounds; serves
/// unconstrained rounds and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl HistoryProvider for NoHistory {
    fn get_recent_rounds(&self) -> Option<Vec<PairingRound>> {
        None
    }

    fn record_round(&mut self, _round: &PairingRound) -> Result<(), HistoryError> {
        Ok(())
    }
}
