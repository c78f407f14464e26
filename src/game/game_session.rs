use log::trace;

use super::deck_generator::DeckGenerator;
use super::ledger_storage::FileStorage;
use super::riddle_source::{RiddleSource, TextGenerator};
use super::round_controller::RoundController;
use super::score_ledger::{HighScoreLedger, ScoreLedger};
use super::settings::Settings;
use crate::events::{Channel, EventEmitter, EventObserver};
use crate::model::{GameEngineCommand, GameEngineEvent, PendingRequest};

/// Drives a [`RoundController`] with a [`RiddleSource`], answering the
/// controller's requests as soon as they are queued.
///
/// A presentation layer only dispatches player commands and clock ticks and
/// listens to [`GameEngineEvent`]s.
pub struct GameSession<G: TextGenerator, L: ScoreLedger> {
    controller: RoundController<L>,
    riddle_source: RiddleSource<G>,
}

pub type OfflineGameSession = GameSession<DeckGenerator, HighScoreLedger<FileStorage>>;

impl<G: TextGenerator, L: ScoreLedger> GameSession<G, L> {
    pub fn new(
        riddle_source: RiddleSource<G>,
        ledger: L,
        game_engine_event_emitter: EventEmitter<GameEngineEvent>,
    ) -> Self {
        Self {
            controller: RoundController::new(ledger, game_engine_event_emitter),
            riddle_source,
        }
    }

    pub fn dispatch(&mut self, command: GameEngineCommand) {
        self.controller.handle_command(command);
        self.service_pending_requests();
    }

    pub fn controller(&self) -> &RoundController<L> {
        &self.controller
    }

    pub fn riddle_source(&self) -> &RiddleSource<G> {
        &self.riddle_source
    }

    fn service_pending_requests(&mut self) {
        loop {
            let requests = self.controller.take_pending_requests();
            if requests.is_empty() {
                break;
            }
            for request in requests {
                trace!(target: "game_session", "Servicing {:?}", request);
                let response = match request {
                    PendingRequest::Riddle { tag, difficulty } => GameEngineCommand::RiddleFetched(
                        tag,
                        self.riddle_source.generate_riddle(difficulty),
                    ),
                    PendingRequest::Hint { tag, answer_name } => GameEngineCommand::HintFetched(
                        tag,
                        self.riddle_source.generate_hint(&answer_name),
                    ),
                };
                self.controller.handle_command(response);
            }
        }
    }
}

impl OfflineGameSession {
    /// Session backed by the built-in riddle deck and the ledger file named in `settings`.
    pub fn offline(settings: &Settings) -> (Self, EventObserver<GameEngineEvent>) {
        let (emitter, observer) = Channel::new();
        let riddle_source = RiddleSource::new(DeckGenerator::new(Settings::seed_from_env()));
        let ledger = HighScoreLedger::new(FileStorage::new(settings.ledger_path()));
        (Self::new(riddle_source, ledger, emitter), observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ledger_storage::MemoryStorage;
    use crate::game::riddle_source::tests::ScriptedGenerator;
    use crate::game::riddle_source::{GenerationRequest, HINT_APOLOGY};
    use crate::model::{Difficulty, Outcome, RoundPhase, Scoreboard};
    use crate::tests::UsingLogger;
    use test_context::test_context;

    type ScriptedSession = GameSession<ScriptedGenerator, HighScoreLedger<MemoryStorage>>;

    fn scripted_session(responses: &[&str]) -> (ScriptedSession, EventObserver<GameEngineEvent>) {
        let generator =
            ScriptedGenerator::with_responses(responses.iter().map(|r| Ok(r.to_string())));
        let (emitter, observer) = Channel::new();
        let session = GameSession::new(
            RiddleSource::new(generator),
            HighScoreLedger::new(MemoryStorage::default()),
            emitter,
        );
        (session, observer)
    }

    fn answer(session: &ScriptedSession) -> Option<&str> {
        session
            .controller()
            .round_state()
            .riddle
            .as_ref()
            .map(|riddle| riddle.answer_name.as_str())
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_full_session_through_scripted_generator(_: &mut UsingLogger) {
        let (mut session, observer) = scripted_session(&[
            r#"{"riddle": "I guard the cosmic order.", "name": "Varuna"}"#,
            r#"{"riddle": "I am pressed from a plant on the mountain.", "name": "Soma"}"#,
            "Priests drink it before the ritual.",
        ]);
        let scoreboard = Scoreboard::new();
        observer.subscribe_handler(scoreboard.clone());

        session.dispatch(GameEngineCommand::NewGame(Difficulty::Medium));
        assert_eq!(session.controller().phase(), RoundPhase::AwaitingGuess);
        assert_eq!(answer(&session), Some("Varuna"));
        assert_eq!(scoreboard.borrow().time_left_seconds, 20);

        session.dispatch(GameEngineCommand::SubmitGuess("varuna".into()));
        assert_eq!(session.controller().score(), 110);
        assert_eq!(scoreboard.borrow().last_points_won, Some(110));

        session.dispatch(GameEngineCommand::NextRound);
        assert_eq!(answer(&session), Some("Soma"));

        session.dispatch(GameEngineCommand::RequestHint);
        assert_eq!(session.controller().score(), 85);
        assert_eq!(
            scoreboard.borrow().hint_text.as_deref(),
            Some("Priests drink it before the ritual.")
        );
        assert_eq!(
            session.riddle_source().generator().requests[2],
            GenerationRequest::hint("Soma")
        );

        session.dispatch(GameEngineCommand::SubmitGuess("Indra".into()));
        assert_eq!(
            session.controller().round_state().outcome,
            Some(Outcome::incorrect_guess("Soma"))
        );
        assert_eq!(
            scoreboard.borrow().feedback.as_deref(),
            Some("Not quite. The correct answer was Soma.")
        );
        let high_scores = session.controller().high_scores();
        assert_eq!(high_scores.best(Difficulty::Medium), Some(85));
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_generator_failures_fall_back(_: &mut UsingLogger) {
        let (mut session, _observer) = scripted_session(&[
            r#"{"riddle": "I am Agni, the fire.", "name": "Agni"}"#,
        ]);

        session.dispatch(GameEngineCommand::NewGame(Difficulty::Easy));
        assert_eq!(
            session.controller().round_state().riddle,
            Some(crate::model::Riddle::fallback())
        );

        session.dispatch(GameEngineCommand::SubmitGuess("Indra".into()));
        session.dispatch(GameEngineCommand::NextRound);
        session.dispatch(GameEngineCommand::RequestHint);

        assert_eq!(
            session.controller().round_state().hint_text.as_deref(),
            Some(HINT_APOLOGY)
        );
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_offline_session_persists_to_data_dir(_: &mut UsingLogger) {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.difficulty = Difficulty::Hard;
        settings.data_dir = Some(dir.path().to_path_buf());
        let (mut session, observer) = OfflineGameSession::offline(&settings);
        let scoreboard = Scoreboard::new();
        observer.subscribe_handler(scoreboard.clone());

        session.dispatch(GameEngineCommand::NewGame(settings.difficulty));
        let answer = session
            .controller()
            .round_state()
            .riddle
            .as_ref()
            .map(|riddle| riddle.answer_name.clone())
            .unwrap();
        session.dispatch(GameEngineCommand::SubmitGuess(answer));
        assert_eq!(session.controller().score(), 110);

        session.dispatch(GameEngineCommand::Quit);

        assert_eq!(scoreboard.borrow().score, 110);
        let reopened = HighScoreLedger::new(FileStorage::new(settings.ledger_path()));
        assert_eq!(
            reopened.load().best(Difficulty::Hard),
            Some(110)
        );
        assert!(settings.ledger_path().starts_with(dir.path()));
    }
}
