use super::{Difficulty, RequestTag, Riddle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEngineCommand {
    /// Starts a fresh session with score zero, abandoning any session in progress.
    NewGame(Difficulty),
    RiddleFetched(RequestTag, Riddle),
    /// Sent once per second by whoever owns the real timer.
    ClockTick(RequestTag),
    UpdateGuess(String),
    SubmitGuess(String),
    RequestHint,
    HintFetched(RequestTag, String),
    NextRound,
    Quit,
}
