use log::{debug, warn};
use thiserror::Error;

use super::ledger_storage::LedgerStorage;
use crate::model::{Difficulty, HighScoreEntry, HighScores};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to write high scores: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize high scores: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable per-difficulty high-score table.
pub trait ScoreLedger {
    /// Never fails: unreadable or corrupt data loads as an empty ledger.
    fn load(&self) -> HighScores;

    /// Records a finished session. Scores of zero or below are ignored.
    fn record(&mut self, score: i64, difficulty: Difficulty) -> Result<(), LedgerError>;
}

/// [`ScoreLedger`] persisted as JSON text in a [`LedgerStorage`].
///
/// Every `record` takes the storage lock, re-reads the stored ledger, inserts,
/// and writes the full ledger back before releasing it, so concurrent writers
/// sharing the storage never lose each other's entries.
#[derive(Debug, Clone, Default)]
pub struct HighScoreLedger<S: LedgerStorage> {
    storage: S,
}

impl<S: LedgerStorage> HighScoreLedger<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: LedgerStorage> ScoreLedger for HighScoreLedger<S> {
    fn load(&self) -> HighScores {
        let contents = match self.storage.read() {
            Ok(Some(contents)) => contents,
            Ok(None) => return HighScores::default(),
            Err(err) => {
                warn!(target: "score_ledger", "Failed to read high scores: {err}");
                return HighScores::default();
            }
        };
        HighScores::from_json(&contents).unwrap_or_else(|err| {
            warn!(target: "score_ledger", "Discarding corrupt high scores: {err}");
            HighScores::default()
        })
    }

    fn record(&mut self, score: i64, difficulty: Difficulty) -> Result<(), LedgerError> {
        if score <= 0 {
            debug!(target: "score_ledger", "Not recording non-positive score {score}");
            return Ok(());
        }
        let _guard = self.storage.lock()?;
        let mut high_scores = self.load();
        high_scores.insert(HighScoreEntry::new(score, difficulty));
        let contents = high_scores.to_json()?;
        self.storage.write(&contents)?;
        debug!(target: "score_ledger", "Recorded {score} on {difficulty}");
        Ok(())
    }
}
