use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

/// Timer length and point math for one difficulty. Constant for the process lifetime.
#[readonly::make]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultySettings {
    pub timer_seconds: u32,
    pub base_points: i64,
    pub time_bonus_per_second: i64,
    pub hint_cost: i64,
}

impl DifficultySettings {
    /// Points for a correct guess made with `time_left_seconds` still on the clock.
    pub fn points_for(&self, time_left_seconds: u32) -> i64 {
        self.base_points + i64::from(time_left_seconds) * self.time_bonus_per_second
    }
}

const EASY_SETTINGS: DifficultySettings = DifficultySettings {
    timer_seconds: 30,
    base_points: 15,
    time_bonus_per_second: 3,
    hint_cost: 15,
};

const MEDIUM_SETTINGS: DifficultySettings = DifficultySettings {
    timer_seconds: 20,
    base_points: 10,
    time_bonus_per_second: 5,
    hint_cost: 25,
};

const HARD_SETTINGS: DifficultySettings = DifficultySettings {
    timer_seconds: 15,
    base_points: 5,
    time_bonus_per_second: 7,
    hint_cost: 40,
};

impl Difficulty {
    pub fn all() -> Vec<Difficulty> {
        vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    pub fn from_index(index: usize) -> Difficulty {
        match index {
            0 => Difficulty::Easy,
            1 => Difficulty::Medium,
            2 => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }

    pub fn settings(&self) -> DifficultySettings {
        match self {
            Difficulty::Easy => EASY_SETTINGS,
            Difficulty::Medium => MEDIUM_SETTINGS,
            Difficulty::Hard => HARD_SETTINGS,
        }
    }

    /// How well known the riddle's subject should be, phrased for a generator prompt
    pub fn prompt_guidance(&self) -> &'static str {
        match self {
            Difficulty::Easy => {
                "a famous, widely known Rishi (sage) or Deva (deity) from the Vedic scriptures. \
                 The riddle should be approachable for a newcomer to Hindu lore"
            }
            Difficulty::Medium => {
                "a Rishi (sage) or Deva (deity) from the Vedic scriptures. \
                 The riddle should be challenging but fair for someone with some knowledge of Hinduism"
            }
            Difficulty::Hard => {
                "a lesser-known Rishi (sage) or Deva (deity) from the Vedic scriptures, \
                 or an obscure aspect of a well-known one. The riddle should be subtle and demand deep knowledge"
            }
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}
