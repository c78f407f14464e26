use itertools::Itertools;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::TimestampSeconds;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use super::Difficulty;

pub const MAX_HIGH_SCORES_PER_DIFFICULTY: usize = 5;

fn unix_epoch() -> SystemTime {
    UNIX_EPOCH
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighScoreEntry {
    pub score: i64,
    pub difficulty: Difficulty,
    // absent in ledgers written before timestamps were kept
    #[serde_as(as = "TimestampSeconds<i64>")]
    #[serde(default = "unix_epoch")]
    pub recorded_at: SystemTime,
}

impl HighScoreEntry {
    pub fn new(score: i64, difficulty: Difficulty) -> Self {
        Self {
            score,
            difficulty,
            recorded_at: SystemTime::now(),
        }
    }
}

/// Top scores per difficulty, each list sorted descending and capped at
/// [`MAX_HIGH_SCORES_PER_DIFFICULTY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    scores: BTreeMap<Difficulty, Vec<HighScoreEntry>>,
}

impl Default for HighScores {
    fn default() -> Self {
        Self {
            scores: Difficulty::all()
                .into_iter()
                .map(|difficulty| (difficulty, Vec::new()))
                .collect(),
        }
    }
}

impl HighScores {
    /// Parses persisted text. Difficulties missing from the text load as empty
    /// lists; entries filed under another difficulty's key are dropped.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        let parsed: BTreeMap<Difficulty, Vec<HighScoreEntry>> = serde_json::from_str(contents)?;
        let mut high_scores = Self::default();
        for (difficulty, entries) in parsed {
            let (kept, misfiled): (Vec<_>, Vec<_>) = entries
                .into_iter()
                .partition(|entry| entry.difficulty == difficulty);
            if !misfiled.is_empty() {
                warn!(
                    target: "score_ledger",
                    "Dropping {} {difficulty} high scores tagged with another difficulty",
                    misfiled.len()
                );
            }
            high_scores.scores.insert(difficulty, kept);
        }
        high_scores.normalize();
        Ok(high_scores)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn get(&self, difficulty: Difficulty) -> &[HighScoreEntry] {
        self.scores
            .get(&difficulty)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn best(&self, difficulty: Difficulty) -> Option<i64> {
        self.get(difficulty).first().map(|entry| entry.score)
    }

    pub fn insert(&mut self, entry: HighScoreEntry) {
        self.scores.entry(entry.difficulty).or_default().push(entry);
        self.normalize();
    }

    pub fn is_empty(&self) -> bool {
        self.scores.values().all(Vec::is_empty)
    }

    fn normalize(&mut self) {
        for entries in self.scores.values_mut() {
            // stable: among equal scores the earlier entry keeps its place
            *entries = std::mem::take(entries)
                .into_iter()
                .sorted_by_key(|entry| Reverse(entry.score))
                .take(MAX_HIGH_SCORES_PER_DIFFICULTY)
                .collect();
        }
    }
}
