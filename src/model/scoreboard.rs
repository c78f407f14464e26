use crate::events::EventHandler;
use crate::model::{Difficulty, GameEngineEvent};
use std::cell::RefCell;
use std::rc::Rc;

/// Read model a presentation layer can keep up to date by subscribing it to
/// the controller's events.
#[derive(Debug, Default)]
pub struct Scoreboard {
    pub difficulty: Option<Difficulty>,
    pub score: i64,
    pub time_left_seconds: u32,
    pub hint_available: bool,
    pub hint_text: Option<String>,
    pub last_points_won: Option<i64>,
    pub feedback: Option<String>,
    pub ledger_warning: Option<String>,
}

impl Scoreboard {
    pub fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }
}

impl EventHandler<GameEngineEvent> for Scoreboard {
    fn handle_event(&mut self, event: &GameEngineEvent) {
        match event {
            GameEngineEvent::SessionStarted { difficulty, .. } => {
                *self = Self {
                    difficulty: Some(*difficulty),
                    ..Default::default()
                };
            }
            GameEngineEvent::RiddleRequested(_) => {
                self.hint_text = None;
                self.last_points_won = None;
                self.feedback = None;
            }
            GameEngineEvent::RoundStarted {
                time_left_seconds, ..
            }
            | GameEngineEvent::TimerTicked {
                time_left_seconds, ..
            } => self.time_left_seconds = *time_left_seconds,
            GameEngineEvent::ScoreChanged(score) => self.score = *score,
            GameEngineEvent::HintAvailabilityChanged(available) => {
                self.hint_available = *available
            }
            GameEngineEvent::HintRevealed(hint) => self.hint_text = Some(hint.clone()),
            GameEngineEvent::RoundResolved(outcome) => {
                if let crate::model::Outcome::Correct { points_awarded, .. } = outcome {
                    self.last_points_won = Some(*points_awarded);
                }
                self.feedback = Some(outcome.message().to_string());
            }
            GameEngineEvent::HighScoreWriteFailed(message) => {
                self.ledger_warning = Some(message.clone())
            }
            GameEngineEvent::HintRejected(_)
            | GameEngineEvent::HighScoreRecorded { .. }
            | GameEngineEvent::SessionEnded { .. } => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Outcome, RequestTag, Riddle};

    #[test]
    fn test_tracks_round_progress() {
        let mut scoreboard = Scoreboard::default();
        let tag = RequestTag::new_session();
        scoreboard.handle_event(&GameEngineEvent::SessionStarted {
            difficulty: Difficulty::Easy,
            settings: Difficulty::Easy.settings(),
        });
        scoreboard.handle_event(&GameEngineEvent::RoundStarted {
            tag,
            riddle: Riddle::fallback(),
            time_left_seconds: 30,
        });
        scoreboard.handle_event(&GameEngineEvent::TimerTicked {
            tag,
            time_left_seconds: 29,
        });
        scoreboard.handle_event(&GameEngineEvent::ScoreChanged(102));
        scoreboard.handle_event(&GameEngineEvent::RoundResolved(Outcome::correct(
            "Indra", 102,
        )));

        assert_eq!(scoreboard.difficulty, Some(Difficulty::Easy));
        assert_eq!(scoreboard.time_left_seconds, 29);
        assert_eq!(scoreboard.score, 102);
        assert_eq!(scoreboard.last_points_won, Some(102));
        assert_eq!(
            scoreboard.feedback.as_deref(),
            Some("Correct! +102 points. The answer is Indra.")
        );

        scoreboard.handle_event(&GameEngineEvent::RiddleRequested(tag.next_round()));
        assert_eq!(scoreboard.feedback, None);
        assert_eq!(scoreboard.last_points_won, None);
        assert_eq!(scoreboard.score, 102);
    }

    #[test]
    fn test_new_session_resets_everything() {
        let mut scoreboard = Scoreboard::default();
        scoreboard.handle_event(&GameEngineEvent::ScoreChanged(40));
        scoreboard.handle_event(&GameEngineEvent::HintRevealed("A hint.".into()));
        scoreboard.handle_event(&GameEngineEvent::SessionStarted {
            difficulty: Difficulty::Hard,
            settings: Difficulty::Hard.settings(),
        });

        assert_eq!(scoreboard.score, 0);
        assert_eq!(scoreboard.hint_text, None);
        assert_eq!(scoreboard.difficulty, Some(Difficulty::Hard));
    }
}
