use super::{Difficulty, DifficultySettings, Outcome, RequestTag, Riddle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintRejection {
    NotAcceptingGuesses,
    AlreadyUsed,
    InsufficientScore { score: i64, hint_cost: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEngineEvent {
    SessionStarted {
        difficulty: Difficulty,
        settings: DifficultySettings,
    },
    RiddleRequested(RequestTag),
    RoundStarted {
        tag: RequestTag,
        riddle: Riddle,
        time_left_seconds: u32,
    },
    TimerTicked {
        tag: RequestTag,
        time_left_seconds: u32,
    },
    ScoreChanged(i64),
    HintAvailabilityChanged(bool),
    HintRejected(HintRejection),
    HintRevealed(String),
    RoundResolved(Outcome),
    HighScoreRecorded {
        score: i64,
        difficulty: Difficulty,
    },
    HighScoreWriteFailed(String),
    SessionEnded {
        final_score: i64,
    },
}
