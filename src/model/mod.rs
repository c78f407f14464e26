mod countdown;
mod difficulty;
mod game_engine_command;
mod game_engine_event;
mod high_score;
mod outcome;
mod pending_request;
mod request_tag;
mod riddle;
mod round_state;
mod scoreboard;

pub use countdown::{ClockSignal, Countdown};
pub use difficulty::{Difficulty, DifficultySettings};
pub use game_engine_command::GameEngineCommand;
pub use game_engine_event::{GameEngineEvent, HintRejection};
pub use high_score::{HighScoreEntry, HighScores, MAX_HIGH_SCORES_PER_DIFFICULTY};
pub use outcome::Outcome;
pub use pending_request::PendingRequest;
pub use request_tag::RequestTag;
pub use riddle::Riddle;
pub use round_state::{RoundPhase, RoundState};
pub use scoreboard::Scoreboard;
