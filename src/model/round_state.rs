use super::{Outcome, Riddle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// No session has been started yet, or the last one was quit.
    Idle,
    Loading,
    AwaitingGuess,
    Resolved,
}

/// Everything the presentation layer needs to draw the current round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundState {
    pub riddle: Option<Riddle>,
    pub time_left_seconds: u32,
    pub guess_text: String,
    pub outcome: Option<Outcome>,
    pub hint_text: Option<String>,
    pub hint_consumed: bool,
}

impl RoundState {
    pub fn loading(timer_seconds: u32) -> Self {
        Self {
            time_left_seconds: timer_seconds,
            ..Default::default()
        }
    }

    pub fn phase(&self) -> RoundPhase {
        match (&self.riddle, &self.outcome) {
            (_, Some(_)) => RoundPhase::Resolved,
            (Some(_), None) => RoundPhase::AwaitingGuess,
            (None, None) => RoundPhase::Loading,
        }
    }

    pub fn is_awaiting_guess(&self) -> bool {
        self.phase() == RoundPhase::AwaitingGuess
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_follows_riddle_and_outcome() {
        let mut state = RoundState::loading(20);
        assert_eq!(state.phase(), RoundPhase::Loading);
        assert_eq!(state.time_left_seconds, 20);

        state.riddle = Some(Riddle::fallback());
        assert!(state.is_awaiting_guess());

        state.outcome = Some(Outcome::timed_out("Indra"));
        assert_eq!(state.phase(), RoundPhase::Resolved);
    }
}
